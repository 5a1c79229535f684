//! Sliding window bookkeeping
//!
//! This module contains the timestamp window behind the admission controller.

use std::collections::VecDeque;

/// Timestamps (ms since epoch) of admitted requests inside the trailing window
#[derive(Debug, Clone, Default)]
pub struct RateWindow {
    admissions: VecDeque<u64>,
}

impl RateWindow {
    /// Create an empty window
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every admission at least `window_ms` old
    pub fn purge(&mut self, now_ms: u64, window_ms: u64) -> usize {
        let before = self.admissions.len();
        self.admissions
            .retain(|&admitted| now_ms.saturating_sub(admitted) < window_ms);
        before - self.admissions.len()
    }

    /// Record an admission
    pub fn push(&mut self, now_ms: u64) {
        self.admissions.push_back(now_ms);
    }

    /// Admissions currently held
    pub fn len(&self) -> usize {
        self.admissions.len()
    }

    /// Whether the window holds no admissions
    pub fn is_empty(&self) -> bool {
        self.admissions.is_empty()
    }

    /// Oldest admission still held
    pub fn oldest(&self) -> Option<u64> {
        // Wall clocks can step backwards, so don't trust insertion order
        self.admissions.iter().copied().min()
    }
}
