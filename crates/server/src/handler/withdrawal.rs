use crate::middleware::validate::SimpleValidatedJson;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    abstract_trait::WithdrawalServiceTrait,
    domain::{
        request::{CreateWithdrawalRequest, FindAllWithdrawalRequest, UpdateWithdrawalStatusRequest},
        response::{
            ErrorResponse, StatusUpdateAck, SubmissionAck, WithdrawalListResponse,
            WithdrawalResponse,
        },
    },
    state::AppState,
    utils::AppError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/withdrawals",
    tag = "Withdrawal",
    params(FindAllWithdrawalRequest),
    responses(
        (status = 200, description = "Withdrawal requests, newest first", body = WithdrawalListResponse),
        (status = 400, description = "Unknown status filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_withdrawals(
    State(data): State<Arc<AppState>>,
    Query(params): Query<FindAllWithdrawalRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data
        .di_container
        .withdrawal_service
        .get_withdrawals(&params)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/withdrawals/{id}",
    tag = "Withdrawal",
    params(
        ("id" = i32, Path, description = "Withdrawal ID")
    ),
    responses(
        (status = 200, description = "Withdrawal request", body = WithdrawalResponse),
        (status = 404, description = "Withdrawal not found", body = ErrorResponse),
    )
)]
pub async fn get_withdrawal(
    State(data): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let response = data
        .di_container
        .withdrawal_service
        .get_withdrawal(id)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/withdrawals",
    tag = "Withdrawal",
    request_body = UpdateWithdrawalStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = StatusUpdateAck),
        (status = 400, description = "Missing id or status", body = ErrorResponse),
        (status = 404, description = "Withdrawal not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn update_withdrawal_status(
    State(data): State<Arc<AppState>>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateWithdrawalStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data
        .di_container
        .withdrawal_service
        .update_status(&body)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/withdraw",
    tag = "Withdrawal",
    request_body = CreateWithdrawalRequest,
    responses(
        (status = 200, description = "Withdrawal request accepted", body = SubmissionAck),
        (status = 400, description = "Missing fields or insufficient balance", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn create_withdrawal(
    State(data): State<Arc<AppState>>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateWithdrawalRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = data
        .di_container
        .withdrawal_service
        .create_withdrawal(&body)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}

pub fn withdrawal_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/api/withdrawals",
            get(get_withdrawals).put(update_withdrawal_status),
        )
        .route("/api/withdrawals/{id}", get(get_withdrawal))
        .route("/api/withdraw", post(create_withdrawal))
        .with_state(app_state)
}
