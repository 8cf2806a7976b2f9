use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::{ListerError, ShortenerError};
use tracing::{debug, error};

use crate::model::MessageResponse;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures of a request, rendered as `{"message": ...}`.
///
/// Bodies carry fixed messages only; the underlying error is logged.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),
    #[error(transparent)]
    Shorten(#[from] ShortenerError),
    #[error(transparent)]
    List(#[from] ListerError),
    #[error("failed to resolve short code: {0}")]
    Resolve(#[source] ShortenerError),
    #[error("short code not found")]
    NotFound,
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::MalformedBody(_) => (StatusCode::BAD_REQUEST, "Malformed request body."),
            AppError::Shorten(ShortenerError::InvalidUrl(_)) => {
                (StatusCode::BAD_REQUEST, "Provide a valid URL to shorten.")
            }
            AppError::Shorten(ShortenerError::InvalidShortCode(_)) => (
                StatusCode::BAD_REQUEST,
                "Custom hash should be 8 characters long and alphanumeric.",
            ),
            AppError::Shorten(ShortenerError::AliasConflict(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Provided custom short URL is not available.",
            ),
            AppError::Shorten(ShortenerError::Exhausted { .. } | ShortenerError::Storage(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate a short URL. Try again later.",
            ),
            AppError::List(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to obtain the list of URLs.",
            ),
            AppError::Resolve(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to resolve the short URL. Try again later.",
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Short URL not found."),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        (status, Json(MessageResponse::new(message))).into_response()
    }
}
