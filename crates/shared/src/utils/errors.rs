use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sqlx::Error as SqlxError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::response::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    SqlxError(#[from] SqlxError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Missing required fields")]
    MissingFields,

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_)
            | AppError::MissingFields
            | AppError::InsufficientBalance
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::SqlxError(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::from(&self))).into_response()
    }
}

/// Failures seen by a caller of the remote withdrawal resources.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx response. `message` is the server's `error` field when the
    /// body carried one.
    #[error("unexpected status {code}")]
    Status { code: u16, message: Option<String> },

    #[error("failed to decode response: {0}")]
    Decode(String),

    /// 2xx response with `success: false`.
    #[error("request rejected")]
    Rejected(Option<String>),
}

impl ApiError {
    /// Message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } | ApiError::Rejected(message) => message.as_deref(),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }
}
