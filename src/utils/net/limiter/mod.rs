//! Admission control for outbound API calls
//!
//! This module provides a sliding window limiter that decides whether a new
//! network call may proceed.

// Module declarations
mod limiter;
mod types;
mod window;


// Re-exports
pub use limiter::AdmissionController;
pub use types::{AdmissionConfig, RateLimitStatus};
pub use window::RateWindow;
