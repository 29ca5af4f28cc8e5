//! Unified error handling at the handler boundary.
//!
//! Provides a unified `AppError` type mapping each failure class to an
//! HTTP response. All route handlers return `Result<T, AppError>`; nothing
//! here is fatal to the process.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::validate::ValidationErrors;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// One or more request fields violated the entity's schema rules.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A referenced id did not resolve, or the request is otherwise
    /// malformed beyond field-level rules.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Store-level constraint violation (e.g. duplicate unique username).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(RepositoryError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Construct a 404 with an entity-specific message.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("Requested record doesn't exist".to_owned()),
            RepositoryError::Conflict(message) => Self::Conflict(message),
            RepositoryError::UnknownReference(message) => Self::BadRequest(message),
            other => Self::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({"errors": errors}),
            ),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({"error": message})),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, json!({"error": message})),
            Self::Conflict(message) => (StatusCode::CONFLICT, json!({"error": message})),
            Self::Database(_) | Self::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                // Don't expose internal error details to clients
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn maps_each_variant_to_its_status_code() {
        assert_eq!(
            status_of(AppError::Validation(ValidationErrors::single(
                "name",
                "Missing data for required field."
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::BadRequest("product id 7 doesn't exist".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::not_found("Customer with id 9 doesn't exist")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Conflict("username already taken".to_owned())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn repository_errors_translate_by_class() {
        assert!(matches!(
            AppError::from(RepositoryError::NotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(RepositoryError::Conflict("dup".to_owned())),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(RepositoryError::UnknownReference("missing".to_owned())),
            AppError::BadRequest(_)
        ));
    }
}
