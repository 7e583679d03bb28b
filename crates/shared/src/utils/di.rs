use anyhow::Result;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    abstract_trait::{DynNotifier, DynWithdrawalRepository, DynWithdrawalService},
    config::ConnectionPool,
    repository::{InMemoryWithdrawalRepository, WithdrawalRepository},
    service::WithdrawalService,
    utils::Metrics,
};

#[derive(Clone)]
pub struct DependenciesInject {
    pub withdrawal_service: DynWithdrawalService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("withdrawal_service", &"DynWithdrawalService")
            .finish()
    }
}

impl DependenciesInject {
    pub async fn new(
        pool: Option<ConnectionPool>,
        notifier: DynNotifier,
        metrics: Arc<Mutex<Metrics>>,
        registry: &mut Registry,
    ) -> Result<Self> {
        let withdrawal_repository = match pool {
            Some(pool) => {
                info!("🗄️ [DI] Using Postgres withdrawal repository");
                Arc::new(WithdrawalRepository::new(pool)) as DynWithdrawalRepository
            }
            None => {
                warn!("⚠️ [DI] DATABASE_URL not set, withdrawals are kept in memory");
                Arc::new(InMemoryWithdrawalRepository::new()) as DynWithdrawalRepository
            }
        };

        Ok(Self::with_repository(withdrawal_repository, notifier, metrics, registry).await)
    }

    pub async fn with_repository(
        withdrawal_repository: DynWithdrawalRepository,
        notifier: DynNotifier,
        metrics: Arc<Mutex<Metrics>>,
        registry: &mut Registry,
    ) -> Self {
        let withdrawal_service = Arc::new(
            WithdrawalService::new(withdrawal_repository, notifier, metrics, registry).await,
        ) as DynWithdrawalService;

        Self { withdrawal_service }
    }
}
