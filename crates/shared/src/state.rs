use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{DynNotifier, DynWithdrawalRepository},
    config::{ConnectionPool, NoopNotifier, TelegramConfig, TelegramNotifier},
    utils::{DependenciesInject, Metrics},
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub metrics: Arc<Mutex<Metrics>>,
}

impl AppState {
    pub async fn new(pool: Option<ConnectionPool>, telegram: Option<TelegramConfig>) -> Result<Self> {
        let notifier: DynNotifier = match telegram {
            Some(config) => Arc::new(TelegramNotifier::new(config)),
            None => Arc::new(NoopNotifier),
        };

        let registry = Arc::new(Mutex::new(Registry::default()));
        let metrics = Arc::new(Mutex::new(Metrics::new()));

        let di_container = {
            let mut registry_guard = registry.lock().await;
            DependenciesInject::new(pool, notifier, metrics.clone(), &mut registry_guard)
                .await
                .context("Failed to initialize dependency injection container")?
        };

        Ok(Self {
            di_container,
            registry,
            metrics,
        })
    }

    /// State over an explicit repository and notifier.
    pub async fn with_repository(
        repository: DynWithdrawalRepository,
        notifier: DynNotifier,
    ) -> Self {
        let registry = Arc::new(Mutex::new(Registry::default()));
        let metrics = Arc::new(Mutex::new(Metrics::new()));

        let di_container = {
            let mut registry_guard = registry.lock().await;
            DependenciesInject::with_repository(
                repository,
                notifier,
                metrics.clone(),
                &mut registry_guard,
            )
            .await
        };

        Self {
            di_container,
            registry,
            metrics,
        }
    }
}
