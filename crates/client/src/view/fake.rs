use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use shared::{
    abstract_trait::WithdrawalApiTrait,
    domain::{
        request::CreateWithdrawalRequest,
        response::{StatusUpdateAck, SubmissionAck, WithdrawalResponse},
        status::{StatusFilter, StatusLabel, WithdrawalStatus},
    },
    utils::ApiError,
};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Calls {
    list: Vec<StatusFilter>,
    update: Vec<(i32, WithdrawalStatus)>,
    submit: Vec<CreateWithdrawalRequest>,
}

/// In-process stand-in for the remote resources that records every call.
#[derive(Debug, Default)]
pub struct FakeApi {
    rows: Mutex<Vec<WithdrawalResponse>>,
    calls: Mutex<Calls>,
    failure: Mutex<Option<ApiError>>,
    list_failure: Mutex<Option<ApiError>>,
}

pub fn row(id: i32, status: &str, amount: i64) -> WithdrawalResponse {
    WithdrawalResponse {
        id,
        phone_number: format!("+7999000{id:04}"),
        bank_name: "Alfa".into(),
        amount: Decimal::from(amount),
        status: status.into(),
        created_at: Utc.timestamp_opt(1_740_000_000 + i64::from(id), 0).unwrap(),
        processed_at: None,
    }
}

impl FakeApi {
    pub fn with_rows(rows: Vec<WithdrawalResponse>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn fail_with(&self, error: ApiError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// Fails only `list`; updates and submissions still go through.
    pub fn fail_lists_with(&self, error: ApiError) {
        *self.list_failure.lock().unwrap() = Some(error);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
        *self.list_failure.lock().unwrap() = None;
    }

    pub fn list_calls(&self) -> Vec<StatusFilter> {
        self.calls.lock().unwrap().list.clone()
    }

    pub fn update_calls(&self) -> Vec<(i32, WithdrawalStatus)> {
        self.calls.lock().unwrap().update.clone()
    }

    pub fn submit_calls(&self) -> usize {
        self.calls.lock().unwrap().submit.len()
    }

    pub fn last_submission(&self) -> Option<CreateWithdrawalRequest> {
        self.calls.lock().unwrap().submit.last().cloned()
    }

    fn check(&self) -> Result<(), ApiError> {
        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WithdrawalApiTrait for FakeApi {
    async fn list(&self, filter: StatusFilter) -> Result<Vec<WithdrawalResponse>, ApiError> {
        self.calls.lock().unwrap().list.push(filter);
        self.check()?;
        if let Some(error) = self.list_failure.lock().unwrap().clone() {
            return Err(error);
        }

        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| filter.matches(&row.status))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<WithdrawalResponse, ApiError> {
        self.check()?;
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or(ApiError::Status {
                code: 404,
                message: Some(format!("Withdrawal with id {id} not found")),
            })
    }

    async fn update_status(
        &self,
        id: i32,
        status: WithdrawalStatus,
    ) -> Result<StatusUpdateAck, ApiError> {
        self.calls.lock().unwrap().update.push((id, status));
        self.check()?;

        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(ApiError::Status {
                code: 404,
                message: None,
            })?;
        row.status = StatusLabel::Known(status);
        row.processed_at = status.is_processed().then(Utc::now);

        Ok(StatusUpdateAck {
            success: true,
            message: Some("Status updated".into()),
        })
    }

    async fn submit(&self, request: &CreateWithdrawalRequest) -> Result<SubmissionAck, ApiError> {
        self.calls.lock().unwrap().submit.push(request.clone());
        self.check()?;

        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        let mut created = row(id, "pending", 0);
        created.amount = request.amount;
        created.phone_number = request.phone_number.clone();
        created.bank_name = request.bank_name.clone();
        rows.push(created);

        Ok(SubmissionAck {
            success: true,
            withdrawal_id: Some(id),
            message: Some("Request accepted".into()),
            error: None,
        })
    }
}
