//! API client module
//!
//! This module provides the request orchestrator: cache lookup, admission
//! control, the network call, cache population, and fallback substitution,
//! plus typed wrappers for each tools endpoint.

mod client;
mod endpoints;
mod request;
mod stats;


// Re-export public types and the main client
pub use client::ApiClient;
pub use stats::ClientStats;
