use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    abstract_trait::WithdrawalRepositoryTrait,
    domain::{
        request::CreateWithdrawalRequest,
        status::{StatusFilter, WithdrawalStatus},
    },
    model::withdrawal::Withdrawal,
    utils::AppError,
};

#[derive(Debug, Default)]
struct Table {
    next_id: i32,
    rows: Vec<Withdrawal>,
}

/// Process-local store used when no `DATABASE_URL` is configured.
#[derive(Debug, Default)]
pub struct InMemoryWithdrawalRepository {
    table: RwLock<Table>,
}

impl InMemoryWithdrawalRepository {
    pub fn new() -> Self {
        Self::default()
    }

}

#[async_trait]
impl WithdrawalRepositoryTrait for InMemoryWithdrawalRepository {
    async fn find_all(&self, filter: StatusFilter) -> Result<Vec<Withdrawal>, AppError> {
        let table = self.table.read().await;

        let mut rows: Vec<Withdrawal> = table
            .rows
            .iter()
            .filter(|row| filter.matches(&row.status_label()))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        info!(
            "📄 [Withdrawal] In-memory fetch - filter: {}, rows: {}",
            filter,
            rows.len()
        );

        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Withdrawal>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn create(&self, input: &CreateWithdrawalRequest) -> Result<Withdrawal, AppError> {
        let mut table = self.table.write().await;
        table.next_id += 1;

        let row = Withdrawal {
            id: table.next_id,
            phone_number: input.phone_number.trim().to_string(),
            bank_name: input.bank_name.trim().to_string(),
            amount: input.amount,
            status: WithdrawalStatus::Pending.as_str().to_string(),
            created_at: Utc::now(),
            processed_at: None,
        };
        table.rows.push(row.clone());

        info!("✅ [Withdrawal] In-memory create: id={}", row.id);

        Ok(row)
    }

    async fn update_status(
        &self,
        id: i32,
        status: WithdrawalStatus,
    ) -> Result<Option<Withdrawal>, AppError> {
        let mut table = self.table.write().await;

        let Some(row) = table.rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };

        row.status = status.as_str().to_string();
        row.processed_at = status.is_processed().then(Utc::now);

        Ok(Some(row.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn request(amount: i64) -> CreateWithdrawalRequest {
        CreateWithdrawalRequest {
            phone_number: " +79990001122 ".into(),
            bank_name: "Alfa".into(),
            amount: Decimal::from(amount),
            user_balance: Decimal::from(1000),
            timestamp: None,
        }
    }

    #[tokio::test]
    async fn created_rows_start_pending_with_fresh_ids() {
        let repo = InMemoryWithdrawalRepository::new();

        let first = repo.create(&request(100)).await.unwrap();
        let second = repo.create(&request(200)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status, "pending");
        assert_eq!(first.phone_number, "+79990001122");
        assert!(first.processed_at.is_none());

        let all = repo.find_all(StatusFilter::All).await.unwrap();
        assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[tokio::test]
    async fn status_update_moves_row_between_filters() {
        let repo = InMemoryWithdrawalRepository::new();
        let row = repo.create(&request(100)).await.unwrap();

        let updated = repo
            .update_status(row.id, WithdrawalStatus::Completed)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.processed_at.is_some());

        let completed = repo
            .find_all(StatusFilter::Only(WithdrawalStatus::Completed))
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);
        assert!(
            repo.find_all(StatusFilter::Only(WithdrawalStatus::Pending))
                .await
                .unwrap()
                .is_empty()
        );

        let reverted = repo
            .update_status(row.id, WithdrawalStatus::Pending)
            .await
            .unwrap()
            .unwrap();
        assert!(reverted.processed_at.is_none());
    }

    #[tokio::test]
    async fn updating_unknown_id_returns_none() {
        let repo = InMemoryWithdrawalRepository::new();
        assert!(
            repo.update_status(9, WithdrawalStatus::Rejected)
                .await
                .unwrap()
                .is_none()
        );
    }
}
