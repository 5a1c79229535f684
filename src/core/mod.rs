//! Core request-handling components
//!
//! This module contains the response cache and the fallback router used by
//! the SDK client.

pub mod cache_manager;
pub mod router;
