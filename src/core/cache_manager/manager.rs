//! Response cache implementation
//!
//! Entries expire lazily on read and in bulk through [`ResponseCache::sweep`].
//! There is no size bound and no LRU ordering.

use super::types::{AtomicCacheStats, CacheConfig, CacheEntry, CacheKey, CacheStats};
use crate::utils::clock::SharedClock;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// TTL cache keyed by request fingerprint
#[derive(Debug)]
pub struct ResponseCache<T = serde_json::Value> {
    entries: DashMap<CacheKey, CacheEntry<T>>,
    config: CacheConfig,
    clock: SharedClock,
    stats: AtomicCacheStats,
}

impl<T: Clone + Send + Sync + 'static> ResponseCache<T> {
    /// Create an empty cache
    pub fn new(config: CacheConfig, clock: SharedClock) -> Self {
        Self {
            entries: DashMap::new(),
            config,
            clock,
            stats: AtomicCacheStats::default(),
        }
    }

    /// Look up a live entry.
    ///
    /// A read past expiry evicts the entry and reports a miss.
    pub fn get(&self, key: &CacheKey) -> Option<T> {
        let now = self.clock.now_ms();

        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired(now) {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for key: {}", key);
                return Some(entry.value.clone());
            }
        }

        // Only drop the entry if it is still the expired one; a concurrent
        // set may already have replaced it.
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired(now))
            .is_some()
        {
            self.stats.expired_on_read.fetch_add(1, Ordering::Relaxed);
            debug!("Evicted expired entry on read: {}", key);
        }

        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a value with the default TTL
    pub fn set(&self, key: CacheKey, value: T) {
        self.set_with_ttl(key, value, self.config.default_ttl());
    }

    /// Store a value, replacing any existing entry for the key
    pub fn set_with_ttl(&self, key: CacheKey, value: T, ttl: Duration) {
        let entry = CacheEntry::new(value, self.clock.now_ms(), ttl);
        debug!("Cached response for key: {} (ttl {:?})", key, ttl);
        self.entries.insert(key, entry);
        self.stats.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Drop one entry
    pub fn remove(&self, key: &CacheKey) -> Option<T> {
        self.entries.remove(key).map(|(_, entry)| entry.value)
    }

    /// Whether a live entry exists, without touching the statistics
    pub fn contains(&self, key: &CacheKey) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    /// Remove every entry
    pub fn clear(&self) {
        let count = self.entries.len();
        self.entries.clear();
        debug!("Cleared {} cache entries", count);
    }

    /// Remove expired entries regardless of access; returns how many went
    pub fn sweep(&self) -> usize {
        let now = self.clock.now_ms();
        let mut removed = 0usize;

        self.entries.retain(|_, entry| {
            if entry.expires_at < now {
                removed += 1;
                false
            } else {
                true
            }
        });

        if removed > 0 {
            self.stats
                .swept
                .fetch_add(removed as u64, Ordering::Relaxed);
            info!("Swept {} expired cache entries", removed);
        }

        removed
    }

    /// Entries physically held, including expired ones not yet evicted
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    /// Cache configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Start a background task that sweeps on a fixed cadence.
    ///
    /// The task runs until the returned handle is aborted.
    pub fn spawn_sweeper(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.sweep();
            }
        })
    }
}
