//! Response DTOs for the facade API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::store::TTL_NO_EXPIRY;

/// Envelope returned by GET and POST on /api/redis/{key}
#[derive(Debug, Clone, Serialize)]
pub struct ValueResponse {
    /// The requested key
    pub key: String,
    /// The stored value, `null` when absent
    pub value: Value,
    /// Whether the key exists
    pub exists: bool,
    /// Remaining seconds, `-1` for no expiration or no key
    pub ttl: i64,
    /// Optional human-readable outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValueResponse {
    /// Creates an envelope for a key that was found.
    pub fn found(key: impl Into<String>, value: Value, exists: bool, ttl: i64) -> Self {
        Self {
            key: key.into(),
            value,
            exists,
            ttl,
            message: None,
        }
    }

    /// Creates an envelope carrying only an error message.
    pub fn failure(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Value::Null,
            exists: false,
            ttl: TTL_NO_EXPIRY,
            message: Some(message.into()),
        }
    }

    /// Attaches a message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Response body for DELETE /api/redis/{key}
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub key: String,
    pub deleted: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>, deleted: bool) -> Self {
        let message = if deleted {
            "Key deleted successfully"
        } else {
            "Key not found"
        };
        Self {
            key: key.into(),
            deleted,
            message: message.to_string(),
        }
    }
}

/// Response body for GET /api/redis/{key}/exists
#[derive(Debug, Clone, Serialize)]
pub struct ExistsResponse {
    pub key: String,
    pub exists: bool,
}

/// Response body for POST /api/redis/{key}/expire
#[derive(Debug, Clone, Serialize)]
pub struct ExpireResponse {
    pub key: String,
    pub timeout: i64,
    /// Unit name echoed as the caller sent it
    #[serde(rename = "timeUnit")]
    pub time_unit: String,
    pub success: bool,
    pub message: String,
}

impl ExpireResponse {
    pub fn new(
        key: impl Into<String>,
        timeout: i64,
        time_unit: impl Into<String>,
        success: bool,
    ) -> Self {
        let message = if success {
            "Expiration set successfully"
        } else {
            "Failed to set expiration"
        };
        Self {
            key: key.into(),
            timeout,
            time_unit: time_unit.into(),
            success,
            message: message.to_string(),
        }
    }
}

/// Response body for GET /api/redis/{key}/ttl
///
/// `exists` is derived from the TTL sentinel, so a key without expiration
/// reports `exists: false`.
#[derive(Debug, Clone, Serialize)]
pub struct TtlResponse {
    pub key: String,
    pub ttl: i64,
    pub exists: bool,
}

impl TtlResponse {
    pub fn new(key: impl Into<String>, ttl: i64) -> Self {
        Self {
            key: key.into(),
            ttl,
            exists: ttl != TTL_NO_EXPIRY,
        }
    }
}

/// Response body for the health endpoint (GET /api/redis/health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// "connected" or "disconnected"
    pub redis: String,
    /// Unix timestamp in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Whether the probe value read back matched what was written
    #[serde(rename = "testResult", skip_serializing_if = "Option::is_none")]
    pub test_result: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    /// Creates a healthy response stamped with the current time.
    pub fn healthy(test_result: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            redis: "connected".to_string(),
            timestamp: Some(chrono::Utc::now().timestamp_millis()),
            test_result: Some(test_result),
            error: None,
        }
    }

    /// Creates an unhealthy response carrying the failure text.
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            redis: "disconnected".to_string(),
            timestamp: None,
            test_result: None,
            error: Some(error.into()),
        }
    }
}

/// Error body for the non-envelope endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
