use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::status::{StatusFilter, UnknownStatus, WithdrawalStatus};

#[derive(Serialize, Deserialize, Clone, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindAllWithdrawalRequest {
    /// `all`, `pending`, `completed` or `rejected`; absent means `all`.
    #[serde(default)]
    pub status: Option<String>,
}

impl FindAllWithdrawalRequest {
    pub fn new(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::All => Self { status: None },
            StatusFilter::Only(status) => Self {
                status: Some(status.as_str().to_string()),
            },
        }
    }

    pub fn filter(&self) -> Result<StatusFilter, UnknownStatus> {
        match self.status.as_deref() {
            None => Ok(StatusFilter::All),
            Some(raw) => raw.parse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWithdrawalRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_present", message = "Missing required fields"))]
    pub phone_number: String,

    #[serde(default)]
    #[validate(custom(function = "validate_present", message = "Missing required fields"))]
    pub bank_name: String,

    #[serde(default)]
    #[validate(custom(function = "validate_positive", message = "Missing required fields"))]
    #[schema(value_type = f64)]
    pub amount: Decimal,

    #[serde(default)]
    #[schema(value_type = f64)]
    pub user_balance: Decimal,

    /// Submitter's local wall-clock time, echoed into the operator notice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl CreateWithdrawalRequest {
    pub fn exceeds_balance(&self) -> bool {
        self.amount > self.user_balance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateWithdrawalStatusRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "Missing id or status"))]
    pub id: i32,

    #[serde(default)]
    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

impl UpdateWithdrawalStatusRequest {
    pub fn new(id: i32, status: WithdrawalStatus) -> Self {
        Self {
            id,
            status: status.as_str().to_string(),
        }
    }

    pub fn target(&self) -> Result<WithdrawalStatus, UnknownStatus> {
        self.status.parse()
    }
}

fn validate_present(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || value.is_zero() {
        return Err(ValidationError::new("positive"));
    }
    Ok(())
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required").with_message("Missing id or status".into()));
    }

    value.parse::<WithdrawalStatus>().map(|_| ()).map_err(|e| {
        ValidationError::new("status").with_message(format!("Invalid status: {}", e.0).into())
    })
}
