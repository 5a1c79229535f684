//! Reachability probing
//!
//! Issues a HEAD request and reports whether the host answered. Any HTTP
//! response counts as reachable; only transport failures do not.

use crate::utils::security::SecurityUtils;
use reqwest::Client;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// Probe timeout
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a reachability probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    /// URL actually probed, after scheme normalisation
    pub url: String,
    pub reachable: bool,
    pub latency_ms: u64,
    /// Status of the response, if one arrived
    pub status: Option<u16>,
    pub message: String,
}

/// Prepend `https://` when no http(s) scheme is present
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Probe `input` with the default timeout
pub async fn probe(client: &Client, input: &str) -> ProbeResult {
    probe_with_timeout(client, input, PROBE_TIMEOUT).await
}

/// Probe `input`, giving up after `timeout`
pub async fn probe_with_timeout(client: &Client, input: &str, timeout: Duration) -> ProbeResult {
    let url = normalize_url(input);
    if !SecurityUtils::validate_url(&url) {
        return ProbeResult {
            url,
            reachable: false,
            latency_ms: 0,
            status: None,
            message: "Invalid URL format".to_string(),
        };
    }

    let start = Instant::now();
    let result = client.head(&url).timeout(timeout).send().await;
    let latency_ms = start.elapsed().as_millis() as u64;
    debug!("Probe of {} finished in {}ms", url, latency_ms);

    match result {
        Ok(response) => ProbeResult {
            url,
            reachable: true,
            latency_ms,
            status: Some(response.status().as_u16()),
            message: format!("Server reachable ({}ms)", latency_ms),
        },
        Err(e) if e.is_timeout() => ProbeResult {
            url,
            reachable: false,
            latency_ms,
            status: None,
            message: format!("Connection timeout (>{}s)", timeout.as_secs()),
        },
        Err(e) => ProbeResult {
            url,
            reachable: false,
            latency_ms,
            status: None,
            message: format!("Connection failed: {}", e),
        },
    }
}
