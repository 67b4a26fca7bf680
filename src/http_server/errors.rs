//! # HTTP API Errors
//!
//! Every failure leaves the API as `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::RepositoryError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by the query API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Request body is not a valid query
    #[error("invalid request structure")]
    InvalidRequest,

    /// The store did not accept a write. Reported as a client error.
    #[error("Failed to set query")]
    SetFailed,

    #[error("{0}")]
    NotFound(String),

    #[error("route not found")]
    RouteNotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest => StatusCode::BAD_REQUEST,
            ApiError::SetFailed => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify a failed create. Every write failure is a 400.
    pub fn from_write(err: RepositoryError) -> Self {
        tracing::warn!(error = %err, "failed to set query");
        ApiError::SetFailed
    }

    /// Classify a failed list or lookup
    pub fn from_read(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => ApiError::NotFound(err.to_string()),
            other => {
                tracing::error!(error = %other, "failed to read queries");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

/// Fallback for a known path hit with a method it does not serve
pub(super) async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
