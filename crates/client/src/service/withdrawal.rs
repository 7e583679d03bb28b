use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    abstract_trait::WithdrawalApiTrait,
    domain::{
        request::{CreateWithdrawalRequest, FindAllWithdrawalRequest, UpdateWithdrawalStatusRequest},
        response::{
            ErrorResponse, StatusUpdateAck, SubmissionAck, WithdrawalListResponse,
            WithdrawalResponse,
        },
        status::{StatusFilter, WithdrawalStatus},
    },
    utils::ApiError,
};
use tracing::{error, info};

use crate::config::ClientConfig;

/// reqwest implementation of the two withdrawal resources.
#[derive(Debug, Clone)]
pub struct HttpWithdrawalApi {
    client: Client,
    withdrawals_url: String,
    submission_url: String,
}

impl HttpWithdrawalApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            withdrawals_url: config.withdrawals_url.trim_end_matches('/').to_string(),
            submission_url: config.submission_url.clone(),
        })
    }

    async fn read(response: Response) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        Ok((status, body.to_vec()))
    }

    fn decode<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ApiError> {
        if !status.is_success() {
            return Err(ApiError::Status {
                code: status.as_u16(),
                message: server_message(body),
            });
        }

        serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    error!("❌ [WithdrawalApi] Transport failure: {e}");
    ApiError::Transport(e.to_string())
}

fn server_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .map(|body| body.error)
        .filter(|message| !message.is_empty())
}

#[async_trait]
impl WithdrawalApiTrait for HttpWithdrawalApi {
    async fn list(&self, filter: StatusFilter) -> Result<Vec<WithdrawalResponse>, ApiError> {
        info!("📥 [WithdrawalApi] Fetching withdrawals - filter: {filter}");

        let response = self
            .client
            .get(&self.withdrawals_url)
            .query(&FindAllWithdrawalRequest::new(filter))
            .send()
            .await
            .map_err(transport)?;

        let (status, body) = Self::read(response).await?;
        let list: WithdrawalListResponse = Self::decode(status, &body)?;

        info!(
            "✅ [WithdrawalApi] Fetched {} withdrawals",
            list.withdrawals.len()
        );

        Ok(list.withdrawals)
    }

    async fn get(&self, id: i32) -> Result<WithdrawalResponse, ApiError> {
        let response = self
            .client
            .get(format!("{}/{id}", self.withdrawals_url))
            .send()
            .await
            .map_err(transport)?;

        let (status, body) = Self::read(response).await?;
        Self::decode(status, &body)
    }

    async fn update_status(
        &self,
        id: i32,
        status: WithdrawalStatus,
    ) -> Result<StatusUpdateAck, ApiError> {
        info!("🔁 [WithdrawalApi] Updating withdrawal #{id} to {status}");

        let response = self
            .client
            .put(&self.withdrawals_url)
            .json(&UpdateWithdrawalStatusRequest::new(id, status))
            .send()
            .await
            .map_err(transport)?;

        let (code, body) = Self::read(response).await?;
        let ack: StatusUpdateAck = Self::decode(code, &body)?;

        if !ack.success {
            return Err(ApiError::Rejected(ack.message));
        }

        Ok(ack)
    }

    async fn submit(&self, request: &CreateWithdrawalRequest) -> Result<SubmissionAck, ApiError> {
        info!(
            "📤 [WithdrawalApi] Submitting withdrawal - amount: {}",
            request.amount
        );

        let response = self
            .client
            .post(&self.submission_url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let (code, body) = Self::read(response).await?;

        if !code.is_success() {
            return Err(ApiError::Status {
                code: code.as_u16(),
                message: server_message(&body),
            });
        }

        let ack: SubmissionAck =
            serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

        if !ack.success {
            return Err(ApiError::Rejected(ack.error));
        }

        info!(
            "✅ [WithdrawalApi] Withdrawal accepted - id: {:?}",
            ack.withdrawal_id
        );

        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> HttpWithdrawalApi {
        let config = ClientConfig::new(
            format!("{}/api/withdrawals", server.uri()),
            format!("{}/api/withdraw", server.uri()),
        );
        HttpWithdrawalApi::new(&config).unwrap()
    }

    fn request() -> CreateWithdrawalRequest {
        CreateWithdrawalRequest {
            phone_number: "+79990001122".into(),
            bank_name: "Alfa".into(),
            amount: Decimal::from(250),
            user_balance: Decimal::from(300),
            timestamp: Some("01.02.2025, 10:00:00".into()),
        }
    }

    #[tokio::test]
    async fn list_sends_status_filter_and_parses_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/withdrawals"))
            .and(query_param("status", "pending"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "withdrawals": [{
                    "id": 1,
                    "phoneNumber": "+79990001122",
                    "bankName": "Alfa",
                    "amount": 100,
                    "status": "pending",
                    "createdAt": "2025-03-01T09:30:00Z",
                    "processedAt": null
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let rows = api_for(&server)
            .list(StatusFilter::Only(WithdrawalStatus::Pending))
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);
        assert!(rows[0].status.is(WithdrawalStatus::Pending));
    }

    #[tokio::test]
    async fn update_status_puts_id_and_target() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/withdrawals"))
            .and(body_json(json!({ "id": 3, "status": "completed" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "message": "Status updated" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let ack = api_for(&server)
            .update_status(3, WithdrawalStatus::Completed)
            .await
            .unwrap();

        assert!(ack.success);
    }

    #[tokio::test]
    async fn error_body_is_surfaced_as_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/withdraw"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "success": false, "error": "Insufficient balance" })),
            )
            .mount(&server)
            .await;

        let err = api_for(&server).submit(&request()).await.unwrap_err();

        assert_eq!(
            err,
            ApiError::Status {
                code: 400,
                message: Some("Insufficient balance".into()),
            }
        );
        assert_eq!(err.server_message(), Some("Insufficient balance"));
    }

    #[tokio::test]
    async fn unsuccessful_ack_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/withdraw"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": false, "error": "Service paused" })),
            )
            .mount(&server)
            .await;

        let err = api_for(&server).submit(&request()).await.unwrap_err();
        assert_eq!(err, ApiError::Rejected(Some("Service paused".into())));
    }

    #[tokio::test]
    async fn submit_posts_camel_case_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/withdraw"))
            .and(body_json(json!({
                "phoneNumber": "+79990001122",
                "bankName": "Alfa",
                "amount": 250.0,
                "userBalance": 300.0,
                "timestamp": "01.02.2025, 10:00:00"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "withdrawalId": 12,
                "message": "Request accepted"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ack = api_for(&server).submit(&request()).await.unwrap();
        assert_eq!(ack.withdrawal_id, Some(12));
    }

    #[tokio::test]
    async fn unreadable_bodies_are_decode_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/withdrawals/5"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/withdrawals/6"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let api = api_for(&server);

        assert!(matches!(api.get(5).await, Err(ApiError::Decode(_))));
        assert_eq!(
            api.get(6).await.unwrap_err(),
            ApiError::Status {
                code: 502,
                message: None,
            }
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let server = MockServer::start().await;
        let api = api_for(&server);
        drop(server);

        let err = api.list(StatusFilter::All).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
