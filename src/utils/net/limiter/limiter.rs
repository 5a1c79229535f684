//! Core AdmissionController implementation
//!
//! This module contains the sliding window admission controller and its
//! queries.

use crate::utils::clock::SharedClock;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

use super::types::{AdmissionConfig, RateLimitStatus};
use super::window::RateWindow;

/// Sliding window admission controller
///
/// Clones share the same window.
#[derive(Debug, Clone)]
pub struct AdmissionController {
    config: AdmissionConfig,
    window: Arc<Mutex<RateWindow>>,
    clock: SharedClock,
}

impl AdmissionController {
    /// Create a new controller
    pub fn new(config: AdmissionConfig, clock: SharedClock) -> Self {
        Self {
            config,
            window: Arc::new(Mutex::new(RateWindow::new())),
            clock,
        }
    }

    /// Admit a request if the window has capacity.
    ///
    /// The capacity check and the recording of the admission happen under one
    /// lock, so concurrent callers can never push the window past
    /// `max_requests`.
    pub fn try_admit(&self) -> bool {
        let now = self.clock.now_ms();
        let mut window = self.window.lock();
        window.purge(now, self.config.window_ms);

        if window.len() < self.config.max_requests as usize {
            window.push(now);
            true
        } else {
            debug!(
                "Admission denied: {} requests in the last {}ms",
                window.len(),
                self.config.window_ms
            );
            false
        }
    }

    /// Whether a request would currently be admitted, without recording one
    pub fn has_capacity(&self) -> bool {
        self.remaining_capacity() > 0
    }

    /// Record an admission unconditionally
    pub fn record_admission(&self) {
        let now = self.clock.now_ms();
        let mut window = self.window.lock();
        window.purge(now, self.config.window_ms);
        window.push(now);
    }

    /// Admissions left in the current window
    pub fn remaining_capacity(&self) -> u32 {
        let count = self.in_window_count();
        self.config.max_requests.saturating_sub(count)
    }

    /// Time (ms since epoch) at which the oldest admission leaves the window,
    /// or 0 when the window is empty
    pub fn next_reset_time(&self) -> u64 {
        let now = self.clock.now_ms();
        let mut window = self.window.lock();
        window.purge(now, self.config.window_ms);
        window
            .oldest()
            .map(|oldest| oldest + self.config.window_ms)
            .unwrap_or(0)
    }

    /// Admissions currently in the window
    pub fn in_window_count(&self) -> u32 {
        let now = self.clock.now_ms();
        let mut window = self.window.lock();
        window.purge(now, self.config.window_ms);
        u32::try_from(window.len()).unwrap_or(u32::MAX)
    }

    /// Limiter status snapshot
    pub fn status(&self) -> RateLimitStatus {
        RateLimitStatus {
            limit: self.config.max_requests,
            remaining: self.remaining_capacity(),
            reset_at_ms: self.next_reset_time(),
        }
    }

    /// Configured limits
    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }
}
