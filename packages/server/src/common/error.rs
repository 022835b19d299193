//! Request-facing error taxonomy.
//!
//! Every operation surfaces one of these variants; none of them crashes the
//! process. `Conflict` means the caller lost a concurrency race (response
//! already processed, need already cancelled) and must re-fetch state before
//! deciding what to do next.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed input or business-rule violation (self-response,
    /// responding to a non-published need, ...). Never retried.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Wrong owner or role.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Unknown entity ID.
    #[error("not found: {0}")]
    NotFound(String),

    /// Lost a concurrency race; terminal outcome for this request.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Permission(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        // Server-side details stay out of 5xx bodies.
        let message = if status.is_server_error() {
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        let body = Json(json!({
            "code": status.as_u16(),
            "message": message,
        }));
        (status, body).into_response()
    }
}

/// SQLSTATE codes signalling a transient serialization/lock failure that the
/// matching engine may retry: 40001 (serialization_failure) and 40P01
/// (deadlock_detected).
pub fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            matches!(db.code().as_deref(), Some("40001") | Some("40P01"))
        }
        _ => false,
    }
}
