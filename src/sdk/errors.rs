//! Error handling

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failure classification callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    RateLimited,
    UpstreamError,
    NetworkError,
    ServiceUnavailable,
    SerializationError,
    InvalidRequest,
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Admission denied before any network I/O
    #[error("Rate limit exceeded. Please wait before making more requests.")]
    RateLimited {
        /// When capacity next frees up (ms since epoch)
        reset_at_ms: u64,
    },

    /// Remote service answered with a non-success status
    #[error("API request failed: {message}")]
    Upstream { status: u16, message: String },

    /// Transport failure with no HTTP status
    #[error("Network error: {0}")]
    Network(String),

    /// Primary failed and no alternate exists
    #[error("{0}")]
    ServiceUnavailable(String),

    /// Response did not have the expected shape
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Request rejected before sending
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Failure classification
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::RateLimited { .. } => ErrorKind::RateLimited,
            ApiError::Upstream { .. } => ErrorKind::UpstreamError,
            ApiError::Network(_) => ErrorKind::NetworkError,
            ApiError::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            ApiError::Serialization(_) => ErrorKind::SerializationError,
            ApiError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            ApiError::Config(_) => ErrorKind::Configuration,
        }
    }

    /// HTTP status reported to callers; 0 when no status applies
    pub fn http_status(&self) -> u16 {
        match self {
            ApiError::RateLimited { .. } => 429,
            ApiError::Upstream { status, .. } => *status,
            ApiError::ServiceUnavailable(_) => 503,
            ApiError::InvalidRequest(_) => 400,
            ApiError::Network(_) | ApiError::Serialization(_) | ApiError::Config(_) => 0,
        }
    }

    /// The service-unavailable failure returned when no fallback exists
    pub fn service_unavailable() -> Self {
        ApiError::ServiceUnavailable("Service temporarily unavailable".to_string())
    }

    /// Serializable view of the error
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
            http_status: self.http_status(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Serialization(error.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            ApiError::InvalidRequest(error.to_string())
        } else if error.is_decode() {
            ApiError::Serialization(error.to_string())
        } else {
            ApiError::Network(error.to_string())
        }
    }
}

/// Error surface as seen by callers: `{kind, message, httpStatus}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
    pub http_status: u16,
}

/// Outcome of a request
pub type RequestOutcome<T> = std::result::Result<T, ApiError>;

/// SDK result type
pub type Result<T> = RequestOutcome<T>;
