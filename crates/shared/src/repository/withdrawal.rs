use crate::model::withdrawal::Withdrawal;
use crate::schema::withdrawal::Withdrawals as WithdrawalSchema;
use crate::utils::AppError;
use crate::{
    abstract_trait::WithdrawalRepositoryTrait,
    config::ConnectionPool,
    domain::{
        request::CreateWithdrawalRequest,
        status::{StatusFilter, WithdrawalStatus},
    },
};
use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Expr, Order, PostgresQueryBuilder, Query, SelectStatement};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

pub struct WithdrawalRepository {
    db_pool: ConnectionPool,
}

impl WithdrawalRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }

    fn select_columns() -> SelectStatement {
        let mut query = Query::select();
        query
            .columns([
                WithdrawalSchema::Id,
                WithdrawalSchema::PhoneNumber,
                WithdrawalSchema::BankName,
                WithdrawalSchema::Amount,
                WithdrawalSchema::Status,
                WithdrawalSchema::CreatedAt,
                WithdrawalSchema::ProcessedAt,
            ])
            .from(WithdrawalSchema::Table);
        query
    }
}

#[async_trait]
impl WithdrawalRepositoryTrait for WithdrawalRepository {
    async fn find_all(&self, filter: StatusFilter) -> Result<Vec<Withdrawal>, AppError> {
        info!("📄 [Withdrawal] Fetching records - filter: {}", filter);

        let mut select_query = Self::select_columns();
        select_query
            .order_by(WithdrawalSchema::CreatedAt, Order::Desc)
            .order_by(WithdrawalSchema::Id, Order::Desc);

        if let Some(status) = filter.status() {
            select_query.and_where(Expr::col(WithdrawalSchema::Status).eq(status.as_str()));
        }

        let (sql, values) = select_query.build_sqlx(PostgresQueryBuilder);
        info!(
            "🧾 [Withdrawal] Generated SQL: {} | Values: {:?}",
            sql, values
        );

        let rows = sqlx::query_as_with::<_, Withdrawal, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Withdrawal] Failed to fetch withdrawals: {}", e);
                AppError::SqlxError(e)
            })?;

        info!("✅ [Withdrawal] Successfully fetched {} records", rows.len());

        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Withdrawal>, AppError> {
        info!("🆔 [Withdrawal] Finding withdrawal by ID: {}", id);

        let (sql, values) = Self::select_columns()
            .and_where(Expr::col(WithdrawalSchema::Id).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, Withdrawal, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!(
                    "❌ [Withdrawal] Failed to execute query for id={}: {}",
                    id, e
                );
                AppError::SqlxError(e)
            })?;

        match &row {
            Some(withdrawal) => info!(
                "✅ [Withdrawal] Found! ID: {}, Amount: {}, Status: {}",
                withdrawal.id, withdrawal.amount, withdrawal.status
            ),
            None => info!("🟡 [Withdrawal] Not found for id={}", id),
        }

        Ok(row)
    }

    async fn create(&self, input: &CreateWithdrawalRequest) -> Result<Withdrawal, AppError> {
        info!(
            "💸 [Withdrawal] Creating new withdrawal: bank={}, amount={}",
            input.bank_name, input.amount
        );

        let (sql, values) = Query::insert()
            .into_table(WithdrawalSchema::Table)
            .columns([
                WithdrawalSchema::PhoneNumber,
                WithdrawalSchema::BankName,
                WithdrawalSchema::Amount,
                WithdrawalSchema::Status,
            ])
            .values([
                input.phone_number.trim().into(),
                input.bank_name.trim().into(),
                input.amount.into(),
                WithdrawalStatus::Pending.as_str().into(),
            ])
            .map_err(|e| AppError::InternalError(format!("Failed to build insert: {e}")))?
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, Withdrawal, _>(&sql, values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Withdrawal] Failed to create withdrawal: {e}");
                AppError::SqlxError(e)
            })?;

        info!("✅ [Withdrawal] Successfully created! id={}", row.id);

        Ok(row)
    }

    async fn update_status(
        &self,
        id: i32,
        status: WithdrawalStatus,
    ) -> Result<Option<Withdrawal>, AppError> {
        info!("🔄 [Withdrawal] Updating status: id={} → {}", id, status);

        let processed_at = status.is_processed().then(Utc::now);

        let (sql, values) = Query::update()
            .table(WithdrawalSchema::Table)
            .values([
                (WithdrawalSchema::Status, status.as_str().into()),
                (WithdrawalSchema::ProcessedAt, processed_at.into()),
            ])
            .and_where(Expr::col(WithdrawalSchema::Id).eq(id))
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, Withdrawal, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!(
                    "❌ [Withdrawal] Failed to update withdrawal id={}: {}",
                    id, e
                );
                AppError::SqlxError(e)
            })?;

        match &row {
            Some(withdrawal) => info!(
                "✅ [Withdrawal] Successfully updated: id={} → status={}",
                withdrawal.id, withdrawal.status
            ),
            None => error!("🟡 [Withdrawal] Not found: id={} does not exist", id),
        }

        Ok(row)
    }
}
