//! Error envelope shared by every Trivia route.
//!
//! The client only ever sees the status code and a fixed message; whatever
//! caused the failure is logged here and dropped.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use trivia_types::api::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("resource not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    /// Validation failures and masked store failures on mutating routes.
    #[error("unprocessable: {0}")]
    Unprocessable(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn unprocessable(cause: impl std::fmt::Display) -> Self {
        Self::Unprocessable(cause.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "Bad request",
            Self::NotFound => "Resource not found.",
            Self::MethodNotAllowed => "Method not allowed.",
            Self::Unprocessable(_) => "Unable to process. Invalid input...",
            Self::Internal(_) => "Internal Server Error. Please try later...",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => error!("Internal error: {:#}", e),
            Self::BadRequest(cause) | Self::Unprocessable(cause) => {
                warn!("Rejected request ({}): {}", self.status(), cause)
            }
            Self::NotFound | Self::MethodNotAllowed => {}
        }

        let status = self.status();
        let body = ErrorResponse {
            success: false,
            error: status.as_u16(),
            message: self.message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}
