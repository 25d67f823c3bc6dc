//! Error types for the store facade
//!
//! Provides unified error handling using thiserror.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for facade and store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Key not present in the store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Caller supplied an argument the facade refuses to forward
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Store unreachable, refused the connection or timed out
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Anything else: protocol, serialization or unexpected store replies
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// HTTP status code for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == Conversions ==
impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error() || err.is_connection_refusal() || err.is_timeout() {
            StoreError::Unavailable(err.to_string())
        } else {
            StoreError::Internal(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Internal(format!("serialization failed: {}", err))
    }
}

impl From<JsonRejection> for StoreError {
    fn from(rejection: JsonRejection) -> Self {
        StoreError::InvalidArgument(rejection.body_text())
    }
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
