use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        request::{CreateWithdrawalRequest, FindAllWithdrawalRequest, UpdateWithdrawalStatusRequest},
        response::{StatusUpdateAck, SubmissionAck, WithdrawalListResponse, WithdrawalResponse},
        status::{StatusFilter, WithdrawalStatus},
    },
    model::withdrawal::Withdrawal,
    utils::AppError,
};

pub type DynWithdrawalRepository = Arc<dyn WithdrawalRepositoryTrait + Send + Sync>;
pub type DynWithdrawalService = Arc<dyn WithdrawalServiceTrait + Send + Sync>;

#[async_trait]
pub trait WithdrawalRepositoryTrait {
    /// Newest first.
    async fn find_all(&self, filter: StatusFilter) -> Result<Vec<Withdrawal>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Withdrawal>, AppError>;
    async fn create(&self, input: &CreateWithdrawalRequest) -> Result<Withdrawal, AppError>;
    /// `None` when no request has this id.
    async fn update_status(
        &self,
        id: i32,
        status: WithdrawalStatus,
    ) -> Result<Option<Withdrawal>, AppError>;
}

#[async_trait]
pub trait WithdrawalServiceTrait {
    async fn get_withdrawals(
        &self,
        req: &FindAllWithdrawalRequest,
    ) -> Result<WithdrawalListResponse, AppError>;
    async fn get_withdrawal(&self, id: i32) -> Result<WithdrawalResponse, AppError>;
    async fn create_withdrawal(
        &self,
        input: &CreateWithdrawalRequest,
    ) -> Result<SubmissionAck, AppError>;
    async fn update_status(
        &self,
        input: &UpdateWithdrawalStatusRequest,
    ) -> Result<StatusUpdateAck, AppError>;
}
