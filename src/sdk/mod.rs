//! Tools API SDK
//!
//! This module provides the client that fronts the remote tools service:
//! response caching, admission control, and fallback routing behind one
//! `request` call, plus typed wrappers per endpoint.

pub mod client;
pub mod config;
pub mod errors;
pub mod types;

// Re-exports for convenience
pub use client::{ApiClient, ClientStats};
pub use config::{ClientConfig, ConfigBuilder};
pub use errors::{ApiError, ErrorKind, ErrorReport, RequestOutcome, Result};
pub use types::*;

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the SDK with default logging
pub fn init() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // Ignore the error if the host application already installed a subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
