//! Integration tests for hyperforge-rs
//!
//! These tests drive the public client API against mock HTTP services.

pub mod client_tests;
pub mod config_tests;
