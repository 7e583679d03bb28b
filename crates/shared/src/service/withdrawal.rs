use crate::{
    abstract_trait::{DynNotifier, DynWithdrawalRepository, WithdrawalServiceTrait},
    domain::{
        request::{CreateWithdrawalRequest, FindAllWithdrawalRequest, UpdateWithdrawalStatusRequest},
        response::{StatusUpdateAck, SubmissionAck, WithdrawalListResponse, WithdrawalResponse},
    },
    utils::{AppError, Method, Metrics, Status as StatusUtils},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};
use validator::Validate;

#[derive(Clone)]
pub struct WithdrawalService {
    withdrawal_repository: DynWithdrawalRepository,
    notifier: DynNotifier,
    metrics: Arc<Mutex<Metrics>>,
}

impl std::fmt::Debug for WithdrawalService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WithdrawalService")
            .field("withdrawal_repository", &"DynWithdrawalRepository")
            .field("notifier", &"DynNotifier")
            .finish()
    }
}

impl WithdrawalService {
    pub async fn new(
        withdrawal_repository: DynWithdrawalRepository,
        notifier: DynNotifier,
        metrics: Arc<Mutex<Metrics>>,
        registry: &mut Registry,
    ) -> Self {
        registry.register(
            "withdrawal_service_request_counter",
            "Total number of requests to the WithdrawalService",
            metrics.lock().await.request_counter.clone(),
        );
        registry.register(
            "withdrawal_service_request_duration",
            "Histogram of requests durations for the WithdrawalService",
            metrics.lock().await.request_duration.clone(),
        );

        Self {
            withdrawal_repository,
            notifier,
            metrics,
        }
    }

    async fn complete<T>(
        &self,
        operation: &str,
        method: Method,
        started: Instant,
        result: Result<T, AppError>,
    ) -> Result<T, AppError> {
        let elapsed = started.elapsed().as_secs_f64();

        let status = match &result {
            Ok(_) => {
                info!("Operation completed successfully: {operation}");
                StatusUtils::Success
            }
            Err(e) => {
                error!("Operation failed: {operation}: {e}");
                StatusUtils::Error
            }
        };

        self.metrics.lock().await.record(method, status, elapsed);

        result
    }
}

#[async_trait]
impl WithdrawalServiceTrait for WithdrawalService {
    async fn get_withdrawals(
        &self,
        req: &FindAllWithdrawalRequest,
    ) -> Result<WithdrawalListResponse, AppError> {
        let started = Instant::now();

        let result: Result<WithdrawalListResponse, AppError> = async {
            let filter = req
                .filter()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;

            let withdrawals = self.withdrawal_repository.find_all(filter).await?;

            info!("Found {} withdrawals", withdrawals.len());

            Ok(WithdrawalListResponse {
                withdrawals: withdrawals
                    .into_iter()
                    .map(WithdrawalResponse::from)
                    .collect(),
            })
        }
        .await;

        self.complete("GetWithdrawals", Method::Get, started, result)
            .await
    }

    async fn get_withdrawal(&self, id: i32) -> Result<WithdrawalResponse, AppError> {
        let started = Instant::now();

        let result = match self.withdrawal_repository.find_by_id(id).await {
            Ok(Some(withdrawal)) => Ok(WithdrawalResponse::from(withdrawal)),
            Ok(None) => Err(AppError::NotFound(format!(
                "Withdrawal with id {id} not found"
            ))),
            Err(e) => Err(e),
        };

        self.complete("GetWithdrawal", Method::Get, started, result)
            .await
    }

    async fn create_withdrawal(
        &self,
        input: &CreateWithdrawalRequest,
    ) -> Result<SubmissionAck, AppError> {
        let started = Instant::now();

        let result: Result<SubmissionAck, AppError> = async {
            if input.validate().is_err() {
                return Err(AppError::MissingFields);
            }

            if input.exceeds_balance() {
                info!(
                    "🚫 [Withdrawal] Amount {} exceeds balance {}",
                    input.amount, input.user_balance
                );
                return Err(AppError::InsufficientBalance);
            }

            let withdrawal = self.withdrawal_repository.create(input).await?;

            self.notifier
                .notify_created(&withdrawal, input.timestamp.as_deref())
                .await;

            Ok(SubmissionAck {
                success: true,
                withdrawal_id: Some(withdrawal.id),
                message: Some("Request accepted".to_string()),
                error: None,
            })
        }
        .await;

        self.complete("CreateWithdrawal", Method::Post, started, result)
            .await
    }

    async fn update_status(
        &self,
        input: &UpdateWithdrawalStatusRequest,
    ) -> Result<StatusUpdateAck, AppError> {
        let started = Instant::now();

        let result: Result<StatusUpdateAck, AppError> = async {
            input.validate()?;

            let target = input
                .target()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;

            match self
                .withdrawal_repository
                .update_status(input.id, target)
                .await?
            {
                Some(_) => Ok(StatusUpdateAck {
                    success: true,
                    message: Some("Status updated".to_string()),
                }),
                None => Err(AppError::NotFound(format!(
                    "Withdrawal with id {} not found",
                    input.id
                ))),
            }
        }
        .await;

        self.complete("UpdateWithdrawalStatus", Method::Put, started, result)
            .await
    }
}
