//! HTTP error mapping
//!
//! Directory errors become structured `{"error": message}` bodies with
//! the status code the contract requires. Storage failures are logged
//! and collapsed into a generic 500.

use crate::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use parley_core::DirectoryError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] DirectoryError);

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            DirectoryError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            DirectoryError::Conflict(msg)
            | DirectoryError::InvalidInput(msg)
            | DirectoryError::InvalidOperation(msg) => (StatusCode::BAD_REQUEST, msg),
            DirectoryError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            DirectoryError::Storage(err) => {
                error!(error = %err, "request failed on storage");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
