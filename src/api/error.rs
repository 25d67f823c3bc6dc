//! Handler Errors
//!
//! Renders facade failures in the body shape each endpoint family uses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::error::StoreError;
use crate::models::{ErrorResponse, ValueResponse};

/// Error returned by the HTTP handlers.
///
/// The status code always comes from the underlying `StoreError` kind.
#[derive(Debug)]
pub enum ApiError {
    /// Failure on an endpoint that answers with a value envelope
    Envelope { key: String, source: StoreError },
    /// Failure on an endpoint that answers with `{ "error": ... }`
    Operation {
        action: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    pub fn envelope(key: impl Into<String>) -> impl FnOnce(StoreError) -> Self {
        let key = key.into();
        move |source| ApiError::Envelope { key, source }
    }

    pub fn operation(action: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ApiError::Operation { action, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Envelope { key, source } => {
                warn!(%key, error = %source, "request failed");
                let status = source.status_code();
                let body = ValueResponse::failure(key, format!("Error: {}", source));
                (status, Json(body)).into_response()
            }
            ApiError::Operation { action, source } => {
                warn!(action, error = %source, "request failed");
                let status = source.status_code();
                let body = ErrorResponse::new(format!("Error {}: {}", action, source));
                (status, Json(body)).into_response()
            }
        }
    }
}
