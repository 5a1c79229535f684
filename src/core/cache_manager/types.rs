//! Cache type definitions
//!
//! This module contains configuration, entries, keys, and statistics for the
//! response cache.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL applied when a caller gives none, in milliseconds
    pub default_ttl_ms: u64,
    /// Cadence of the optional background sweep, in seconds
    pub sweep_interval_secs: Option<u64>,
}

impl CacheConfig {
    /// Default TTL as a duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_ms: 300_000, // 5 minutes
            sweep_interval_secs: None,
        }
    }
}

/// Cached value with its expiry
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub value: T,
    /// When the entry was stored (ms since epoch)
    pub stored_at: u64,
    /// When the entry expires (ms since epoch)
    pub expires_at: u64,
}

impl<T> CacheEntry<T> {
    /// Create an entry expiring `ttl` after `now_ms`
    pub fn new(value: T, now_ms: u64, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: now_ms,
            expires_at: now_ms.saturating_add(ttl.as_millis() as u64),
        }
    }

    /// An entry is live through its expiry instant and gone right after
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at
    }
}

/// Request fingerprint
///
/// Built from the endpoint path and the canonical JSON of the request body.
/// `serde_json` keeps object keys sorted, so field order never changes the
/// key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a request
    pub fn from_request(path: &str, body: Option<&serde_json::Value>) -> Self {
        let body = match body {
            Some(body) => body.to_string(),
            None => "{}".to_string(),
        };
        Self(format!("api_{}_{}", path, body))
    }

    /// Key as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Atomic cache counters
#[derive(Debug, Default)]
pub struct AtomicCacheStats {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub inserts: AtomicU64,
    /// Entries dropped by a read past expiry
    pub expired_on_read: AtomicU64,
    /// Entries dropped by sweeps
    pub swept: AtomicU64,
}

/// Cache statistics snapshot
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub expired_on_read: u64,
    pub swept: u64,
    /// Entries physically held, expired or not
    pub entries: usize,
}

impl CacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl AtomicCacheStats {
    /// Create a snapshot of current stats
    pub fn snapshot(&self, entries: usize) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            expired_on_read: self.expired_on_read.load(Ordering::Relaxed),
            swept: self.swept.load(Ordering::Relaxed),
            entries,
        }
    }
}
