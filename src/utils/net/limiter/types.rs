//! Admission control types
//!
//! This module defines configuration and status types for the limiter.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Admission limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Maximum admitted requests per window
    pub max_requests: u32,
    /// Window length in milliseconds
    pub window_ms: u64,
}

impl AdmissionConfig {
    /// Build a config from a request count and window length
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window_ms: window.as_millis() as u64,
        }
    }

    /// Window length
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_ms: 60_000,
        }
    }
}

/// Snapshot of the limiter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitStatus {
    /// Configured limit
    pub limit: u32,
    /// Admissions still available in the current window
    pub remaining: u32,
    /// When the oldest admission leaves the window (ms since epoch, 0 if empty)
    pub reset_at_ms: u64,
}
