//! Response shaping for errors.
//!
//! # Responsibilities
//! - Map every `ApiError` to its HTTP status
//! - Render the body as `{ "error": <message> }`
//!
//! # Design Decisions
//! - All errors are caller errors (4xx) and log at debug level only
//! - Body rejections keep the status axum chose for them (400/415/422)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::ApiError;

/// Error response body (JSON).
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UserNotFound(_) | ApiError::TodoNotFound => StatusCode::NOT_FOUND,
            ApiError::DuplicateUsername
            | ApiError::AlreadyPro
            | ApiError::InvalidId
            | ApiError::InvalidDeadline => StatusCode::BAD_REQUEST,
            ApiError::QuotaExceeded => StatusCode::FORBIDDEN,
            ApiError::MalformedBody(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = %status, error = %self, "Request rejected");

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
