use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        request::CreateWithdrawalRequest,
        response::{StatusUpdateAck, SubmissionAck, WithdrawalResponse},
        status::{StatusFilter, WithdrawalStatus},
    },
    utils::ApiError,
};

pub type DynWithdrawalApi = Arc<dyn WithdrawalApiTrait + Send + Sync>;

/// The two remote resources as seen from a front-end: the withdrawal
/// collection (list, show, status update) and the submission endpoint.
#[async_trait]
pub trait WithdrawalApiTrait {
    async fn list(&self, filter: StatusFilter) -> Result<Vec<WithdrawalResponse>, ApiError>;
    async fn get(&self, id: i32) -> Result<WithdrawalResponse, ApiError>;
    async fn update_status(
        &self,
        id: i32,
        status: WithdrawalStatus,
    ) -> Result<StatusUpdateAck, ApiError>;
    async fn submit(&self, request: &CreateWithdrawalRequest) -> Result<SubmissionAck, ApiError>;
}
