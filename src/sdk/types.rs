//! SDK types
//!
//! Endpoints, per-call options, and the typed payloads exchanged with the
//! tools API.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

const MINUTE: Duration = Duration::from_secs(60);
const DAY: Duration = Duration::from_secs(86_400);

/// Supported remote operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    /// Email address validation
    ValidateEmail,
    /// URL shortening
    ShortenUrl,
    /// Caller IP lookup
    IpLookup,
    /// Caller user-agent lookup
    UserAgent,
    /// Request header inspection
    Headers,
    /// Server-side text hashing
    HashText,
    /// Password breach lookup by hash
    PasswordBreach,
    /// Service health
    Health,
}

impl Endpoint {
    /// Every endpoint
    pub const ALL: [Endpoint; 8] = [
        Endpoint::ValidateEmail,
        Endpoint::ShortenUrl,
        Endpoint::IpLookup,
        Endpoint::UserAgent,
        Endpoint::Headers,
        Endpoint::HashText,
        Endpoint::PasswordBreach,
        Endpoint::Health,
    ];

    /// Path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ValidateEmail => "/tools/validate-email",
            Endpoint::ShortenUrl => "/tools/shorten-url",
            Endpoint::IpLookup => "/tools/ip",
            Endpoint::UserAgent => "/tools/user-agent",
            Endpoint::Headers => "/tools/headers",
            Endpoint::HashText => "/tools/hash",
            Endpoint::PasswordBreach => "/tools/password-breach",
            Endpoint::Health => "/health",
        }
    }

    /// HTTP method
    pub fn method(&self) -> Method {
        match self {
            Endpoint::ValidateEmail
            | Endpoint::ShortenUrl
            | Endpoint::HashText
            | Endpoint::PasswordBreach => Method::POST,
            Endpoint::IpLookup | Endpoint::UserAgent | Endpoint::Headers | Endpoint::Health => {
                Method::GET
            }
        }
    }

    /// TTL for cached responses; `None` for endpoints that are never cached
    pub fn default_ttl(&self) -> Option<Duration> {
        match self {
            Endpoint::ValidateEmail | Endpoint::UserAgent => Some(5 * MINUTE),
            Endpoint::IpLookup | Endpoint::Headers => Some(MINUTE),
            Endpoint::HashText | Endpoint::PasswordBreach => Some(DAY),
            Endpoint::ShortenUrl | Endpoint::Health => None,
        }
    }

    /// Whether responses may be cached at all
    pub fn is_cacheable(&self) -> bool {
        self.default_ttl().is_some()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Per-call options
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Overrides the endpoint's method
    pub method: Option<Method>,
    /// JSON body
    pub body: Option<serde_json::Value>,
    /// `false` skips both cache lookup and cache storage
    pub cache: bool,
    /// Overrides the endpoint's TTL
    pub ttl: Option<Duration>,
    /// Overrides the client timeout
    pub timeout: Option<Duration>,
    /// Extra headers
    pub headers: HashMap<String, String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: None,
            body: None,
            cache: true,
            ttl: None,
            timeout: None,
            headers: HashMap::new(),
        }
    }
}

impl RequestOptions {
    /// Default options: cached, endpoint method, no body
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Bypass the cache for this call
    pub fn no_cache(mut self) -> Self {
        self.cache = false;
        self
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

// ==================== Request payloads ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailValidationRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenUrlRequest {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashTextRequest {
    pub text: String,
    pub algorithm: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordBreachRequest {
    pub hash: String,
}

// ==================== Response payloads ====================

/// Email validation verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailValidation {
    #[serde(default)]
    pub email: Option<String>,
    pub valid: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Shortened URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenedUrl {
    #[serde(alias = "shortUrl")]
    pub short_url: String,
    #[serde(default, alias = "originalUrl")]
    pub original_url: Option<String>,
}

/// Caller IP
///
/// The echo service reports the address as `origin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpInfo {
    #[serde(alias = "origin")]
    pub ip: String,
    #[serde(flatten)]
    pub details: HashMap<String, serde_json::Value>,
}

/// Caller user agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgentInfo {
    #[serde(alias = "user-agent", alias = "userAgent")]
    pub user_agent: String,
}

/// Headers as seen by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadersInfo {
    pub headers: HashMap<String, String>,
}

/// Server-side hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashResult {
    pub hash: String,
    #[serde(default)]
    pub algorithm: Option<String>,
}

/// Breach lookup result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachCheck {
    pub breached: bool,
    #[serde(default)]
    pub count: Option<u64>,
}
