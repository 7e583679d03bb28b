use anyhow::{Context, Result};
use card_referral_server::handler::AppRouter;
use shared::{
    config::{Config, ConnectionManager},
    state::AppState,
    utils::init_logger,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let _guard = init_logger(config.log_format, "card-referral-server");

    let db_pool = match config.database_url.as_deref() {
        Some(url) => Some(
            ConnectionManager::new_pool(url, config.run_migrations)
                .await
                .context("Failed to initialize database pool")?,
        ),
        None => None,
    };

    if config.telegram.is_none() {
        info!("🔕 Telegram credentials not set, new requests will not be announced");
    }

    let state = AppState::new(db_pool, config.telegram.clone())
        .await
        .context("Failed to build application state")?;

    AppRouter::serve(config.port, state)
        .await
        .context("HTTP server failed")?;

    info!("👋 Server stopped");

    Ok(())
}
