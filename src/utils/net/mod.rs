//! Network utilities
//!
//! This module provides admission control and reachability probing.

pub mod limiter;
pub mod probe;

// Re-export commonly used types and functions
pub use limiter::{AdmissionConfig, AdmissionController, RateLimitStatus};
pub use probe::{ProbeResult, probe};
