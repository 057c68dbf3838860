//! Error handling for the practice API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use vocab_core::{CopyError, IngestError, SessionError};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Copy error: {0}")]
    Copy(#[from] CopyError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::Ingest(IngestError::Empty) => (StatusCode::UNPROCESSABLE_ENTITY, "empty_vocabulary"),
            ApiError::Ingest(IngestError::SourceUnavailable(_)) => {
                (StatusCode::BAD_GATEWAY, "source_unavailable")
            }
            ApiError::Session(SessionError::NotIngested) => (StatusCode::CONFLICT, "not_ingested"),
            ApiError::Session(SessionError::NoMatches) => (StatusCode::CONFLICT, "no_matches"),
            ApiError::Copy(_) => (StatusCode::SERVICE_UNAVAILABLE, "copy_failed"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
