//! Core API client implementation

use super::stats::AtomicClientStats;
use crate::core::cache_manager::{CacheStats, ResponseCache};
use crate::core::router::FallbackRouter;
use crate::sdk::{config::ClientConfig, errors::*};
use crate::utils::clock::{SharedClock, system_clock};
use crate::utils::net::limiter::{AdmissionController, RateLimitStatus};
use crate::utils::net::probe::{self, ProbeResult};
use crate::utils::security::SecurityUtils;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

/// Client for the tools API
///
/// Owns its admission window, response cache, and fallback table. Clones share
/// that state; separately constructed clients never do.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) api_key: Arc<str>,
    pub(crate) http_client: reqwest::Client,
    pub(crate) limiter: AdmissionController,
    pub(crate) cache: Arc<ResponseCache>,
    pub(crate) fallbacks: Arc<FallbackRouter>,
    pub(crate) stats: Arc<AtomicClientStats>,
}

impl ApiClient {
    /// Create a new client on the system clock
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_clock(config, system_clock())
    }

    /// Create a new client reading time from `clock`
    pub fn with_clock(config: ClientConfig, clock: SharedClock) -> Result<Self> {
        Self::with_parts(config, clock, FallbackRouter::standard())
    }

    /// Create a new client with an explicit fallback table
    pub fn with_parts(
        config: ClientConfig,
        clock: SharedClock,
        fallbacks: FallbackRouter,
    ) -> Result<Self> {
        config.validate()?;

        // Build HTTP client
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(format!("hyperforge-rs/{}", crate::VERSION))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let api_key: Arc<str> = match &config.api_key {
            Some(key) => Arc::from(key.as_str()),
            None => Arc::from(SecurityUtils::generate_session_key()),
        };

        let limiter = AdmissionController::new(config.rate_limit, clock.clone());
        let cache = Arc::new(ResponseCache::new(config.cache.clone(), clock));

        info!(
            "ApiClient created for {} ({} requests per {}ms)",
            config.base_url, config.rate_limit.max_requests, config.rate_limit.window_ms
        );

        let client = Self {
            config: Arc::new(config),
            api_key,
            http_client,
            limiter,
            cache,
            fallbacks: Arc::new(fallbacks),
            stats: Arc::new(AtomicClientStats::default()),
        };

        Ok(client)
    }

    /// Start the background cache sweep configured by `cache.sweep_interval_secs`.
    ///
    /// Returns `None` when no cadence is configured. Requires a Tokio runtime.
    pub fn start_configured_sweeper(&self) -> Option<JoinHandle<()>> {
        self.config
            .cache
            .sweep_interval_secs
            .map(|secs| self.spawn_cache_sweeper(Duration::from_secs(secs)))
    }

    /// Sweep expired cache entries every `interval` until the handle is aborted
    pub fn spawn_cache_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        self.cache.clone().spawn_sweeper(interval)
    }

    /// Drop every cached response
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Drop expired cached responses; returns how many were removed
    pub fn sweep_cache(&self) -> usize {
        self.cache.sweep()
    }

    /// Cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Admission window status
    pub fn rate_limit_status(&self) -> RateLimitStatus {
        self.limiter.status()
    }

    /// Check whether `url` answers at all, bypassing cache and admission
    pub async fn probe(&self, url: &str) -> ProbeResult {
        probe::probe(&self.http_client, url).await
    }

    /// API key sent with every request
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
