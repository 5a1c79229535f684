//! Fallback routing
//!
//! Static mapping from a primary endpoint to an alternate path on the
//! fallback service. The table is fixed once the router is built.

use crate::sdk::types::Endpoint;
use std::collections::HashMap;

/// Alternate target for a primary endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackRoute {
    /// Path on the fallback service, e.g. `/ip`
    pub path: String,
}

impl FallbackRoute {
    /// Create a route to `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Fallback table
///
/// Only consulted when a primary call fails at the transport level (and, if
/// enabled in the client config, on upstream 5xx responses). Admission and
/// cache outcomes never reach it.
#[derive(Debug, Clone, Default)]
pub struct FallbackRouter {
    routes: HashMap<Endpoint, FallbackRoute>,
}

impl FallbackRouter {
    /// Create a router with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// The echo-service table used by the client
    pub fn standard() -> Self {
        Self::new()
            .with_route(Endpoint::IpLookup, "/ip")
            .with_route(Endpoint::UserAgent, "/user-agent")
            .with_route(Endpoint::Headers, "/headers")
    }

    /// Add a route (builder pattern)
    pub fn with_route(mut self, endpoint: Endpoint, path: impl Into<String>) -> Self {
        self.routes.insert(endpoint, FallbackRoute::new(path));
        self
    }

    /// Alternate for `endpoint`, if one is registered
    pub fn resolve(&self, endpoint: Endpoint) -> Option<&FallbackRoute> {
        self.routes.get(&endpoint)
    }

    /// Whether `endpoint` has an alternate
    pub fn has_fallback(&self, endpoint: Endpoint) -> bool {
        self.routes.contains_key(&endpoint)
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are registered
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
