//! Request routing
//!
//! - `fallback` - alternate endpoints for failed primary calls

pub mod fallback;

pub use fallback::{FallbackRoute, FallbackRouter};
