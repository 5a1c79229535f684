//! Utility modules
//!
//! ## Module Organization
//!
//! - **clock**: Time sources for windows and expiry
//! - **net**: Admission control and reachability probing
//! - **security**: Input sanitising and token helpers

pub mod clock;
pub mod net;
pub mod security;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use security::SecurityUtils;

use uuid::Uuid;

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
