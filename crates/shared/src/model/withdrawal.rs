use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::domain::status::StatusLabel;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Withdrawal {
    pub id: i32,
    pub phone_number: String,
    pub bank_name: String,
    pub amount: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl Withdrawal {
    pub fn status_label(&self) -> StatusLabel {
        StatusLabel::from(self.status.as_str())
    }
}
