//! Client configuration

use crate::core::cache_manager::CacheConfig;
use crate::sdk::errors::{ApiError, Result};
use crate::utils::net::limiter::AdmissionConfig;
use crate::utils::security::SecurityUtils;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Tools API base URL
    pub base_url: String,
    /// Base URL of the echo service used for fallbacks
    pub fallback_base_url: String,
    /// API key; a session key is generated when absent
    pub api_key: Option<String>,
    /// Sent as `X-Client-Version`
    pub client_version: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Admission limits
    pub rate_limit: AdmissionConfig,
    /// Response cache settings
    pub cache: CacheConfig,
    /// Also fall back when a fallback-capable endpoint answers 5xx
    pub fallback_on_server_error: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.hyperforgestudios.org".to_string(),
            fallback_base_url: "https://httpbin.org".to_string(),
            api_key: None,
            client_version: "2.0".to_string(),
            timeout_secs: 30,
            rate_limit: AdmissionConfig::default(),
            cache: CacheConfig::default(),
            fallback_on_server_error: false,
        }
    }
}

impl ClientConfig {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the configuration for values the client cannot run with
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("base_url", &self.base_url),
            ("fallback_base_url", &self.fallback_base_url),
        ] {
            if !SecurityUtils::validate_url(url) {
                return Err(ApiError::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        if self.rate_limit.max_requests == 0 {
            return Err(ApiError::Config(
                "rate_limit.max_requests must be greater than 0".to_string(),
            ));
        }
        if self.rate_limit.window_ms == 0 {
            return Err(ApiError::Config(
                "rate_limit.window_ms must be greater than 0".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ApiError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if matches!(self.api_key.as_deref(), Some(key) if key.trim().is_empty()) {
            return Err(ApiError::Config("api_key must not be empty".to_string()));
        }

        Ok(())
    }

    /// Configuration from `HYPERFORGE_*` environment variables, on top of the
    /// defaults
    pub fn from_env() -> Result<Self> {
        let mut builder = ConfigBuilder::new();

        if let Ok(url) = std::env::var("HYPERFORGE_BASE_URL") {
            builder = builder.base_url(&url);
        }
        if let Ok(url) = std::env::var("HYPERFORGE_FALLBACK_URL") {
            builder = builder.fallback_base_url(&url);
        }
        if let Ok(key) = std::env::var("HYPERFORGE_API_KEY") {
            builder = builder.api_key(&key);
        }
        if let Some(timeout) = env_number("HYPERFORGE_TIMEOUT_SECS")? {
            builder = builder.timeout(timeout);
        }
        if let Some(max) = env_number("HYPERFORGE_RATE_LIMIT")? {
            let max = u32::try_from(max).map_err(|_| {
                ApiError::Config("HYPERFORGE_RATE_LIMIT is out of range".to_string())
            })?;
            builder = builder.max_requests(max);
        }
        if let Some(window) = env_number("HYPERFORGE_RATE_WINDOW_MS")? {
            builder = builder.rate_window(Duration::from_millis(window));
        }

        let config = builder.build();
        config.validate()?;
        Ok(config)
    }

    /// Configuration from a YAML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            ApiError::Config(format!("Failed to parse config file {}: {}", path, e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

fn env_number(name: &str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ApiError::Config(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}

/// Fluent builder for [`ClientConfig`], starting from the defaults
pub struct ConfigBuilder {
    config: ClientConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.config.base_url = url.to_string();
        self
    }

    pub fn fallback_base_url(mut self, url: &str) -> Self {
        self.config.fallback_base_url = url.to_string();
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.config.api_key = Some(key.to_string());
        self
    }

    pub fn client_version(mut self, version: &str) -> Self {
        self.config.client_version = version.to_string();
        self
    }

    /// Whole-request timeout in seconds
    pub fn timeout(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Admission limit per window
    pub fn max_requests(mut self, max_requests: u32) -> Self {
        self.config.rate_limit.max_requests = max_requests;
        self
    }

    /// Admission window length
    pub fn rate_window(mut self, window: Duration) -> Self {
        self.config.rate_limit.window_ms = window.as_millis() as u64;
        self
    }

    /// TTL used when neither the call nor the endpoint supplies one
    pub fn default_cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.cache.default_ttl_ms = ttl.as_millis() as u64;
        self
    }

    /// Run a background cache sweep at this cadence
    pub fn cache_sweep_interval(mut self, interval: Duration) -> Self {
        self.config.cache.sweep_interval_secs = Some(interval.as_secs().max(1));
        self
    }

    pub fn fallback_on_server_error(mut self, enabled: bool) -> Self {
        self.config.fallback_on_server_error = enabled;
        self
    }

    /// Finish building; call `validate` or construct a client to check the result
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
