use crate::utils::AppError;
use core::fmt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod withdrawal;

pub use self::withdrawal::{
    StatusUpdateAck, SubmissionAck, WithdrawalListResponse, WithdrawalResponse, WithdrawalStats,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub success: bool,
    pub error: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        let error_message = match error {
            AppError::SqlxError(_) => "Database error occurred".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::ValidationError(errors) => errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Validation error".to_string()),
            AppError::MissingFields => "Missing required fields".to_string(),
            AppError::InsufficientBalance => "Insufficient balance".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::InternalError(_) => "Internal server error".to_string(),
        };

        ErrorResponse {
            success: false,
            error: error_message,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        ErrorResponse::from(&error)
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)
    }
}
