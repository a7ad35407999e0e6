//! HTTP error handling and response mapping.
//!
//! Maps the repository's error-kind discriminants onto the API's status
//! taxonomy: validation and malformed identifiers are 400s, missing records
//! are 404s, everything else is a 500 carrying the underlying message (and
//! nothing more) for diagnostics.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::validation::FieldError;
use crate::db::RepositoryError;

pub const INVALID_ID_MESSAGE: &str = "Invalid parameter type. The id must be a valid ObjectId.";
pub const NOT_FOUND_MESSAGE: &str = "Restaurant not found by this id.";

/// Error body for 400 validation failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    pub message: String,
    pub errors: Vec<FieldError>,
}

/// Error body for everything else: a fixed `error` line, with an optional
/// `message` carrying the underlying cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Input failed declared constraints; one message per failed field.
    Validation(Vec<FieldError>),
    /// Path identifier is not a structurally valid ObjectId.
    InvalidId,
    /// No record with the requested identifier.
    NotFound,
    /// Unexpected storage failure.
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidId => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Validation(errors) => (
                status,
                Json(ValidationErrorBody {
                    message: "Validation failed.".to_string(),
                    errors,
                }),
            )
                .into_response(),
            AppError::InvalidId => (
                status,
                Json(ErrorBody {
                    error: INVALID_ID_MESSAGE.to_string(),
                    message: None,
                }),
            )
                .into_response(),
            AppError::NotFound => (
                status,
                Json(ErrorBody {
                    error: NOT_FOUND_MESSAGE.to_string(),
                    message: None,
                }),
            )
                .into_response(),
            AppError::Internal(message) => (
                status,
                Json(ErrorBody {
                    error: "Internal Server Error.".to_string(),
                    message: Some(message),
                }),
            )
                .into_response(),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // Client-supplied input caused this one, so it is downgraded to
            // a 400 rather than surfacing as a server failure.
            RepositoryError::InvalidId(_) => AppError::InvalidId,
            RepositoryError::NotFound(_) => AppError::NotFound,
            other => AppError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id_maps_to_400() {
        let e: AppError = RepositoryError::invalid_id("xyz").into();
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let e: AppError = RepositoryError::not_found("nope").into();
        assert_eq!(e.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_repository_failures_map_to_500_with_message() {
        let e: AppError = RepositoryError::query("connection reset").into();
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        match e {
            AppError::Internal(msg) => assert!(msg.contains("connection reset")),
            other => panic!("expected Internal, got {:?}", other),
        }
    }

    #[test]
    fn validation_errors_are_a_400() {
        let e = AppError::Validation(vec![FieldError {
            field: "page".into(),
            message: "Page must be a number".into(),
        }]);
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
    }
}
