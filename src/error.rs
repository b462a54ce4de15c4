// src/error.rs

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failure reported by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// The backend refused or could not perform the call.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be decoded into its record type.
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Global Application Error Enum.
/// Every failure carries a human-readable message alongside its kind.
#[derive(Debug, Error)]
pub enum AppError {
    /// 400 Bad Request: missing or malformed input. Never worth retrying as-is.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// 404 Not Found: a referenced id does not resolve.
    #[error("not found: {0}")]
    NotFound(String),

    /// 500 Internal Server Error: a store call failed. Multi-step writes are not
    /// idempotent, so a retry may meet partial effects of the failed attempt;
    /// the message names how far the operation got. Never holds raw store errors.
    #[error("persistence error: {0}")]
    PersistenceError(String),
}

impl AppError {
    /// Machine-readable kind, sent next to the message.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::PersistenceError(_) => "persistence_error",
        }
    }
}

/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, error_message) = match self {
            AppError::PersistenceError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        let body = Json(json!({
            "error": error_message,
            "kind": kind,
        }));

        (status, body).into_response()
    }
}

/// Allows using `?` on store calls inside the services.
///
/// The raw store error is logged here and kept out of the message, which ends
/// up in the response body.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Store call failed: {:?}", err);
        AppError::PersistenceError(
            "The data store failed to complete the operation; re-fetch before retrying.".to_string(),
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

/// Malformed or incomplete JSON bodies are the caller's fault.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}
