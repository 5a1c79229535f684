//! Statistics and metrics

use super::client::ApiClient;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free request counters
#[derive(Debug, Default)]
pub(crate) struct AtomicClientStats {
    pub requests: AtomicU64,
    pub cache_hits: AtomicU64,
    pub network_calls: AtomicU64,
    pub rate_limited: AtomicU64,
    pub fallbacks: AtomicU64,
    pub failures: AtomicU64,
}

impl AtomicClientStats {
    pub fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Client statistics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientStats {
    /// Calls to `request`
    pub requests: u64,
    /// Calls answered from cache
    pub cache_hits: u64,
    /// Primary network calls attempted
    pub network_calls: u64,
    /// Calls refused by admission control
    pub rate_limited: u64,
    /// Calls substituted by a fallback endpoint
    pub fallbacks: u64,
    /// Calls that ended in an error
    pub failures: u64,
}

impl ApiClient {
    /// Get client statistics
    pub fn stats(&self) -> ClientStats {
        let stats = &self.stats;
        ClientStats {
            requests: stats.requests.load(Ordering::Relaxed),
            cache_hits: stats.cache_hits.load(Ordering::Relaxed),
            network_calls: stats.network_calls.load(Ordering::Relaxed),
            rate_limited: stats.rate_limited.load(Ordering::Relaxed),
            fallbacks: stats.fallbacks.load(Ordering::Relaxed),
            failures: stats.failures.load(Ordering::Relaxed),
        }
    }
}
