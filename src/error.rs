//! Error types for the Attio ↔ Apollo sync bridge.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when talking to either platform's REST API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned a non-2xx status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic API error with context
    #[error("API error: {0}")]
    Other(String),
}

/// Errors raised by a sync invocation.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A field needed to match or create the target record is absent.
    #[error("{object} record {record_id} is missing required field: {field}")]
    MissingField {
        object: String,
        record_id: String,
        field: &'static str,
    },

    /// A call to the Attio API failed
    #[error("Attio request failed: {0}")]
    Attio(#[source] ApiError),

    /// A call to the Apollo API failed
    #[error("Apollo request failed: {0}")]
    Apollo(#[source] ApiError),

    /// Caller supplied an invalid argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Object slug that the bridge does not sync
    #[error("Unsupported object type: {0}")]
    UnsupportedObject(String),
}

impl SyncError {
    /// Build a `MissingField` error.
    pub fn missing(object: impl Into<String>, record_id: impl Into<String>, field: &'static str) -> Self {
        SyncError::MissingField {
            object: object.into(),
            record_id: record_id.into(),
            field,
        }
    }
}

impl From<crate::domain::ValidationError> for SyncError {
    fn from(error: crate::domain::ValidationError) -> Self {
        match error {
            crate::domain::ValidationError::UnknownObject(slug) => SyncError::UnsupportedObject(slug),
            other => SyncError::InvalidInput(other.to_string()),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// Convenience type alias for Results with SyncError
pub type SyncResult<T> = Result<T, SyncError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
