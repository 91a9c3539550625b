//! HTTP error responses.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors a handler can answer with.
#[derive(Debug)]
pub enum ApiError {
    /// The request or its upload is unusable (400).
    BadRequest(String),
    /// The upload went over the configured body limit (413).
    PayloadTooLarge(String),
    /// Anything else (500).
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(self) -> String {
        match self {
            ApiError::BadRequest(message)
            | ApiError::PayloadTooLarge(message)
            | ApiError::Internal(message) => message,
        }
    }

    /// Map a multipart read failure, keeping axum's status for it.
    pub fn from_multipart(err: MultipartError) -> Self {
        match err.status() {
            StatusCode::PAYLOAD_TOO_LARGE => {
                ApiError::PayloadTooLarge("Upload exceeds the maximum allowed size.".to_string())
            }
            status if status.is_server_error() => {
                ApiError::Internal(format!("Failed to read upload: {}", err.body_text()))
            }
            _ => ApiError::BadRequest(format!("Failed to read upload: {}", err.body_text())),
        }
    }
}

impl From<oceer::Error> for ApiError {
    fn from(err: oceer::Error) -> Self {
        if err.is_invalid_input() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Internal(format!("An unexpected error occurred: {}", err))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed with {}: {:?}", status, self);
        } else {
            log::warn!("Rejected request with {}: {:?}", status, self);
        }
        (status, Json(ErrorResponse { error: self.message() })).into_response()
    }
}
