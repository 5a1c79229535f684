//! Request lifecycle
//!
//! Cache check, admission check, primary call, cache store, and fallback
//! substitution for a single call.

use super::client::ApiClient;
use super::stats::AtomicClientStats;
use crate::core::cache_manager::CacheKey;
use crate::sdk::{errors::*, types::*};
use crate::utils::generate_request_id;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

impl ApiClient {
    /// Run one request through cache, admission control, the network, and
    /// fallback routing.
    ///
    /// Failures come back as values; nothing past this boundary panics or
    /// needs exception-style handling.
    pub async fn request(&self, endpoint: Endpoint, options: RequestOptions) -> RequestOutcome<Value> {
        AtomicClientStats::incr(&self.stats.requests);

        let result = self.execute(endpoint, options).await;
        if let Err(e) = &result {
            AtomicClientStats::incr(&self.stats.failures);
            debug!("Request to {} failed: {} ({})", endpoint, e, e.kind());
        }
        result
    }

    /// [`request`](Self::request), decoding the result into `T`.
    ///
    /// A response of the wrong shape is dropped from the cache so the next
    /// call fetches again instead of failing on the same value.
    pub async fn request_typed<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        options: RequestOptions,
    ) -> RequestOutcome<T> {
        let key = CacheKey::from_request(endpoint.path(), options.body.as_ref());
        let value = self.request(endpoint, options).await?;

        serde_json::from_value(value).map_err(|e| {
            warn!("Unexpected response shape from {}: {}", endpoint, e);
            self.cache.remove(&key);
            AtomicClientStats::incr(&self.stats.failures);
            ApiError::from(e)
        })
    }

    async fn execute(&self, endpoint: Endpoint, options: RequestOptions) -> RequestOutcome<Value> {
        let key = CacheKey::from_request(endpoint.path(), options.body.as_ref());
        let use_cache = options.cache && endpoint.is_cacheable();

        // Hits never count against the admission window
        if use_cache {
            if let Some(cached) = self.cache.get(&key) {
                AtomicClientStats::incr(&self.stats.cache_hits);
                return Ok(cached);
            }
        }

        if !self.limiter.try_admit() {
            AtomicClientStats::incr(&self.stats.rate_limited);
            let reset_at_ms = self.limiter.next_reset_time();
            warn!(
                "Rate limit reached for {}; capacity frees at {}",
                endpoint, reset_at_ms
            );
            return Err(ApiError::RateLimited { reset_at_ms });
        }

        let request_id = generate_request_id();
        match self.send_primary(endpoint, &options, &request_id).await {
            Ok(value) => {
                if use_cache {
                    let ttl = options
                        .ttl
                        .or_else(|| endpoint.default_ttl())
                        .unwrap_or_else(|| self.cache.config().default_ttl());
                    self.cache.set_with_ttl(key, value.clone(), ttl);
                }
                Ok(value)
            }
            Err(e) if self.falls_back_on(endpoint, &e) => {
                warn!(
                    "Primary call to {} failed ({}), trying fallback [request_id={}]",
                    endpoint, e, request_id
                );
                self.request_fallback(endpoint, &request_id).await
            }
            Err(e) => Err(e),
        }
    }

    /// Transport failures and unparseable primary bodies always go to fallback
    /// evaluation; upstream 5xx only when enabled and an alternate exists
    fn falls_back_on(&self, endpoint: Endpoint, error: &ApiError) -> bool {
        match error {
            ApiError::Network(_) => true,
            ApiError::Upstream { status, .. } => {
                self.config.fallback_on_server_error
                    && *status >= 500
                    && self.fallbacks.has_fallback(endpoint)
            }
            _ => false,
        }
    }

    async fn send_primary(
        &self,
        endpoint: Endpoint,
        options: &RequestOptions,
        request_id: &str,
    ) -> RequestOutcome<Value> {
        let url = format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path()
        );
        let method = options.method.clone().unwrap_or_else(|| endpoint.method());

        let mut builder = self
            .http_client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header("X-API-Key", &*self.api_key)
            .header("X-Request-ID", request_id)
            .header("X-Client-Version", &self.config.client_version);

        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        debug!("{} {} [request_id={}]", method, url, request_id);
        AtomicClientStats::incr(&self.stats.network_calls);

        let response = builder.send().await.map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream {} answered {} [request_id={}]", endpoint, status, request_id);
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        // A truncated or non-JSON body is unclassified, so it goes through
        // fallback evaluation like any transport failure
        let bytes = response.bytes().await.map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Unparseable body from {} [request_id={}]: {}", endpoint, request_id, e);
            ApiError::Network(format!("Invalid response body: {}", e))
        })
    }

    /// Single substitute call against the fallback service: uncached and not
    /// admission-checked
    async fn request_fallback(&self, endpoint: Endpoint, request_id: &str) -> RequestOutcome<Value> {
        let Some(route) = self.fallbacks.resolve(endpoint) else {
            return Err(ApiError::service_unavailable());
        };

        let url = format!(
            "{}{}",
            self.config.fallback_base_url.trim_end_matches('/'),
            route.path
        );
        info!("Falling back to {} for {} [request_id={}]", url, endpoint, request_id);
        AtomicClientStats::incr(&self.stats.fallbacks);

        let response = self
            .http_client
            .get(&url)
            .header("X-Request-ID", request_id)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
