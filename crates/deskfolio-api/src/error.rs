//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use deskfolio_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Newtype carrying an [`AppError`] across the handler boundary.
///
/// Handlers return `Result<_, ApiError>` so that `?` on service calls
/// converts automatically via `From`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.kind {
            ErrorKind::InvalidPath | ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::FileNotFound | ErrorKind::DirectoryNotFound => StatusCode::NOT_FOUND,
            ErrorKind::FileAlreadyExists => StatusCode::CONFLICT,
            ErrorKind::ProtectedResource => StatusCode::FORBIDDEN,
            ErrorKind::InvalidMove => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Storage
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => {
                tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_expected_statuses() {
        let cases = [
            (AppError::invalid_path("x"), StatusCode::BAD_REQUEST),
            (AppError::validation("x"), StatusCode::BAD_REQUEST),
            (AppError::file_not_found("x"), StatusCode::NOT_FOUND),
            (AppError::directory_not_found("x"), StatusCode::NOT_FOUND),
            (AppError::already_exists("x"), StatusCode::CONFLICT),
            (AppError::protected("x"), StatusCode::FORBIDDEN),
            (AppError::invalid_move("x"), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
