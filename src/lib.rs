//! # hyperforge-rs
//!
//! Client for the Hyperforge developer tools API.
//!
//! ## Features
//!
//! - **Response caching**: identical requests inside their TTL are answered
//!   from memory
//! - **Admission control**: a sliding window caps outbound calls
//!   (100 per minute by default)
//! - **Fallback routing**: IP, user-agent, and header lookups fall back to a
//!   public echo service when the primary is unreachable
//! - **Typed outcomes**: every failure is an [`ApiError`] with a kind and an
//!   HTTP status
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hyperforge_rs::{ApiClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::default())?;
//!
//!     match client.ip_info().await {
//!         Ok(info) => println!("IP: {}", info.ip),
//!         Err(e) => println!("{} ({}): {}", e.kind(), e.http_status(), e),
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod core;
pub mod sdk;
pub mod utils;

// Re-export main types
pub use sdk::{
    ApiClient, ApiError, ClientConfig, ConfigBuilder, Endpoint, ErrorKind, RequestOptions,
    RequestOutcome,
};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Unix timestamp of the build
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Version and build metadata of this binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
