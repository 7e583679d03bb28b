use crate::{
    domain::status::{StatusLabel, WithdrawalStatus},
    model::withdrawal::Withdrawal,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalResponse {
    pub id: i32,
    pub phone_number: String,
    pub bank_name: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub status: StatusLabel,
    #[schema(format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(format = "date-time")]
    pub processed_at: Option<DateTime<Utc>>,
}

impl From<Withdrawal> for WithdrawalResponse {
    fn from(value: Withdrawal) -> Self {
        WithdrawalResponse {
            status: value.status_label(),
            id: value.id,
            phone_number: value.phone_number,
            bank_name: value.bank_name,
            amount: value.amount.normalize(),
            created_at: value.created_at,
            processed_at: value.processed_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, PartialEq, Default)]
pub struct WithdrawalListResponse {
    #[serde(default)]
    pub withdrawals: Vec<WithdrawalResponse>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAck {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawal_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, PartialEq)]
pub struct StatusUpdateAck {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Review-screen counters, always taken over the unfiltered set.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    /// Saturates at `Decimal::MAX` instead of overflowing.
    pub total_amount: Decimal,
}

impl WithdrawalStats {
    pub fn from_records(records: &[WithdrawalResponse]) -> Self {
        records.iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            stats.total_amount = stats.total_amount.saturating_add(record.amount);
            if record.status.is(WithdrawalStatus::Pending) {
                stats.pending += 1;
            } else if record.status.is(WithdrawalStatus::Completed) {
                stats.completed += 1;
            }
            stats
        })
    }
}
