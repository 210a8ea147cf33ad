use axum::http::StatusCode;
use serde_json::json;
use webbuilder_core::error::CoreError;

use crate::event::ProjectResponse;

/// Application-level error type for the project handler.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant maps to a `{"error": "..."}` [`ProjectResponse`]; server-side
/// failures are logged and answered with a generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `webbuilder_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx, including pool acquisition failures.
    /// Always answered with a generic 500; the detail is only logged.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured limit.
    #[error("Payload too large")]
    PayloadTooLarge,

    /// The invocation did not finish within the request timeout.
    #[error("Request timed out")]
    Timeout,

    /// The HTTP method has no operation.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Failed to encode a response body.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "Internal server error";

impl AppError {
    /// Map the error to its status code and client-facing message.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => {
                    (StatusCode::NOT_FOUND, format!("{entity} not found"))
                }
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            },

            // --- Database errors ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large".to_string(),
            ),
            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "Request timed out".to_string(),
            ),
            AppError::MethodNotAllowed(_) => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            AppError::Serialization(err) => {
                tracing::error!(error = %err, "Failed to encode response body");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        }
    }

    /// Render the error as an invocation response.
    pub fn into_project_response(self) -> ProjectResponse {
        let (status, message) = self.status_and_message();
        ProjectResponse::json(status, &json!({ "error": message }))
    }
}
