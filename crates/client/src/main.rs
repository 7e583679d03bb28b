use anyhow::{Context, Result};
use card_referral_client::cli::{Cli, run};
use clap::Parser;
use dotenv::dotenv;
use shared::utils::{LogFormat, init_logger};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let log_format = cli
        .log_format
        .parse::<LogFormat>()
        .context("Invalid log format")?;
    let _guard = init_logger(log_format, "card-referral-client");

    run(cli).await
}
