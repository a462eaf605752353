//! Application error type and its HTTP representation.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::db_error::is_unique_violation;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned in JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors surfaced by services and handlers.
///
/// Every variant maps to exactly one HTTP status in [`IntoResponse`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed target URL or custom code. User-correctable.
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    /// The requested custom code belongs to another link.
    #[error("{message}")]
    CodeConflict { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Persistence failure. Reported as a generic server error.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::CodeConflict {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error is rendered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::CodeConflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::InvalidInput { message, details } => ("invalid_input", message, details),
            AppError::CodeConflict { message, details } => ("code_conflict", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::StoreUnavailable { message, details } => {
                ("store_unavailable", message, details)
            }
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation(&e) {
            let constraint = e
                .as_database_error()
                .and_then(|db| db.constraint())
                .map(str::to_owned);
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": constraint }),
            );
        }

        tracing::error!(error = %e, "Database error");
        AppError::store_unavailable("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&errors).unwrap_or_default(),
        )
    }
}

/// Malformed bodies, wrong field types and a missing `Content-Type` all
/// surface as `invalid_input`.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
