use chrono::Local;
use rust_decimal::Decimal;
use shared::{
    abstract_trait::DynWithdrawalApi,
    domain::{request::CreateWithdrawalRequest, response::SubmissionAck},
    utils::ApiError,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::notice::Notice;

const SUBMITTED_AT_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionInvalid {
    #[error("phone number, bank and amount are required")]
    MissingFields,

    #[error("amount must be a positive number")]
    InvalidAmount,

    #[error("insufficient funds, balance is {balance}")]
    InsufficientBalance { balance: Decimal },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Rejected locally; no request was sent.
    #[error("invalid submission: {0}")]
    Invalid(#[from] SubmissionInvalid),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    pub fn notice(&self) -> Notice {
        match self {
            SubmitError::Invalid(SubmissionInvalid::MissingFields) => Notice::error(
                "Fill in all fields",
                "Enter your phone number, bank and withdrawal amount",
            ),
            SubmitError::Invalid(SubmissionInvalid::InvalidAmount) => Notice::error(
                "Invalid amount",
                "The amount must be a positive number",
            ),
            SubmitError::Invalid(SubmissionInvalid::InsufficientBalance { balance }) => {
                Notice::error("Insufficient funds", format!("Your balance is {balance} ₽"))
            }
            SubmitError::Api(e) => Notice::error(
                "Error",
                e.server_message()
                    .unwrap_or("Could not submit the request"),
            ),
        }
    }
}

/// Plain (`12.5`) or scientific (`1e3`) notation.
fn parse_amount(raw: &str) -> Option<Decimal> {
    raw.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// State of the withdrawal request form.
///
/// `balance` is the locally known bonus balance; it is never changed by a
/// submission.
pub struct SubmissionForm {
    api: DynWithdrawalApi,
    pub phone_number: String,
    pub bank_name: String,
    pub amount: String,
    balance: Decimal,
    notice: Option<Notice>,
}

impl std::fmt::Debug for SubmissionForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionForm")
            .field("phone_number", &self.phone_number)
            .field("bank_name", &self.bank_name)
            .field("amount", &self.amount)
            .field("balance", &self.balance)
            .finish()
    }
}

impl SubmissionForm {
    pub fn new(api: DynWithdrawalApi, balance: Decimal) -> Self {
        Self {
            api,
            phone_number: String::new(),
            bank_name: String::new(),
            amount: String::new(),
            balance,
            notice: None,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Builds the outgoing payload, or the reason the form cannot be sent.
    pub fn validate(&self, submitted_at: String) -> Result<CreateWithdrawalRequest, SubmissionInvalid> {
        let phone_number = self.phone_number.trim();
        let bank_name = self.bank_name.trim();
        let amount = self.amount.trim();

        if phone_number.is_empty() || bank_name.is_empty() || amount.is_empty() {
            return Err(SubmissionInvalid::MissingFields);
        }

        let amount = parse_amount(amount)
            .filter(|amount| amount.is_sign_positive() && !amount.is_zero())
            .ok_or(SubmissionInvalid::InvalidAmount)?;

        if amount > self.balance {
            return Err(SubmissionInvalid::InsufficientBalance {
                balance: self.balance,
            });
        }

        Ok(CreateWithdrawalRequest {
            phone_number: phone_number.to_string(),
            bank_name: bank_name.to_string(),
            amount,
            user_balance: self.balance,
            timestamp: Some(submitted_at),
        })
    }

    pub async fn submit(&mut self) -> Result<SubmissionAck, SubmitError> {
        let submitted_at = Local::now().format(SUBMITTED_AT_FORMAT).to_string();

        let result = match self.validate(submitted_at) {
            Ok(request) => self.api.submit(&request).await.map_err(SubmitError::from),
            Err(invalid) => {
                warn!("🚫 [Submission] Blocked locally: {invalid}");
                Err(SubmitError::from(invalid))
            }
        };

        match &result {
            Ok(ack) => {
                info!(
                    "✅ [Submission] Request accepted - id: {:?}",
                    ack.withdrawal_id
                );
                self.phone_number.clear();
                self.bank_name.clear();
                self.amount.clear();
                self.notice = Some(Notice::success(
                    "Request sent!",
                    "Your withdrawal request has been accepted for processing",
                ));
            }
            Err(e) => {
                self.notice = Some(e.notice());
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::fake::FakeApi;
    use std::sync::Arc;

    fn filled(api: Arc<FakeApi>, balance: i64, amount: &str) -> SubmissionForm {
        let mut form = SubmissionForm::new(api, Decimal::from(balance));
        form.phone_number = " +79990001122 ".into();
        form.bank_name = "Alfa".into();
        form.amount = amount.into();
        form
    }

    #[tokio::test]
    async fn amount_over_balance_is_blocked_without_a_call() {
        let api = Arc::new(FakeApi::default());
        let mut form = filled(api.clone(), 300, "500");

        let err = form.submit().await.unwrap_err();

        assert_eq!(
            err,
            SubmitError::Invalid(SubmissionInvalid::InsufficientBalance {
                balance: Decimal::from(300)
            })
        );
        assert_eq!(api.submit_calls(), 0);
        let notice = form.notice().unwrap();
        assert!(notice.is_error());
        assert!(notice.description.contains("300"));
        assert_eq!(form.amount, "500");
    }

    #[tokio::test]
    async fn empty_fields_are_blocked_without_a_call() {
        let api = Arc::new(FakeApi::default());

        for (phone, bank, amount) in [("", "Alfa", "10"), ("+7999", " ", "10"), ("+7999", "Alfa", "")] {
            let mut form = SubmissionForm::new(api.clone(), Decimal::from(300));
            form.phone_number = phone.into();
            form.bank_name = bank.into();
            form.amount = amount.into();

            let err = form.submit().await.unwrap_err();
            assert_eq!(err, SubmitError::Invalid(SubmissionInvalid::MissingFields));
        }

        assert_eq!(api.submit_calls(), 0);
    }

    #[tokio::test]
    async fn non_numeric_amount_is_blocked() {
        let api = Arc::new(FakeApi::default());

        for amount in ["abc", "12,5", "-3", "0", "0.00"] {
            let mut form = filled(api.clone(), 300, amount);
            let err = form.submit().await.unwrap_err();
            assert_eq!(err, SubmitError::Invalid(SubmissionInvalid::InvalidAmount));
        }

        assert_eq!(api.submit_calls(), 0);
    }

    #[tokio::test]
    async fn accepted_submission_clears_fields_and_keeps_balance() {
        let api = Arc::new(FakeApi::default());
        let mut form = filled(api.clone(), 300, "250");

        let ack = form.submit().await.unwrap();

        assert!(ack.success);
        assert_eq!(api.submit_calls(), 1);
        assert!(form.phone_number.is_empty());
        assert!(form.bank_name.is_empty());
        assert!(form.amount.is_empty());
        assert_eq!(form.balance(), Decimal::from(300));
        assert!(!form.notice().unwrap().is_error());

        let sent = api.last_submission().unwrap();
        assert_eq!(sent.phone_number, "+79990001122");
        assert_eq!(sent.amount, Decimal::from(250));
        assert_eq!(sent.user_balance, Decimal::from(300));
        let stamp = sent.timestamp.unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(&stamp, SUBMITTED_AT_FORMAT).is_ok());
    }

    #[tokio::test]
    async fn fractional_and_scientific_amounts_are_sent() {
        let api = Arc::new(FakeApi::default());

        let mut form = filled(api.clone(), 300, "12.5");
        form.submit().await.unwrap();
        assert_eq!(api.last_submission().unwrap().amount, Decimal::new(125, 1));

        let mut form = filled(api.clone(), 300, "2.5e2");
        form.submit().await.unwrap();
        assert_eq!(api.last_submission().unwrap().amount, Decimal::from(250));

        let mut form = filled(api.clone(), 300, "300.01");
        let err = form.submit().await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Invalid(SubmissionInvalid::InsufficientBalance { .. })
        ));
        assert_eq!(api.submit_calls(), 2);
    }

    #[tokio::test]
    async fn failed_submission_keeps_fields_and_shows_server_message() {
        let api = Arc::new(FakeApi::default());
        api.fail_with(ApiError::Rejected(Some("Service paused".into())));
        let mut form = filled(api.clone(), 300, "100");

        let err = form.submit().await.unwrap_err();

        assert!(matches!(err, SubmitError::Api(_)));
        assert_eq!(form.amount, "100");
        assert_eq!(form.notice().unwrap().description, "Service paused");
    }

    #[tokio::test]
    async fn transport_failure_shows_generic_message() {
        let api = Arc::new(FakeApi::default());
        api.fail_with(ApiError::Transport("connection refused".into()));
        let mut form = filled(api.clone(), 300, "100");

        form.submit().await.unwrap_err();

        assert_eq!(
            form.notice().unwrap().description,
            "Could not submit the request"
        );
    }
}
