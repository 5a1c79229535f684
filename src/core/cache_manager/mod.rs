//! Response caching with per-entry expiry
//!
//! This module provides the TTL cache used by the API client to reuse
//! responses for identical requests.

pub mod manager;
pub mod types;


pub use manager::ResponseCache;
pub use types::{CacheConfig, CacheEntry, CacheKey, CacheStats};
