use anyhow::{Context, Result, anyhow};

use crate::utils::LogFormat;

const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone, PartialEq)]
pub struct TelegramConfig {
    pub api_url: String,
    pub bot_token: String,
    pub admin_chat_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `None` runs the server on the in-memory store.
    pub database_url: Option<String>,
    pub run_migrations: bool,
    pub port: u16,
    pub telegram: Option<TelegramConfig>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());

        let run_migrations_str =
            lookup("RUN_MIGRATIONS").context("Missing environment variable: RUN_MIGRATIONS")?;

        let port_str = lookup("PORT").context("Missing environment variable: PORT")?;

        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let telegram = match (lookup("TELEGRAM_BOT_TOKEN"), lookup("TELEGRAM_ADMIN_CHAT_ID")) {
            (Some(bot_token), Some(admin_chat_id))
                if !bot_token.is_empty() && !admin_chat_id.is_empty() =>
            {
                Some(TelegramConfig {
                    api_url: lookup("TELEGRAM_API_URL")
                        .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
                    bot_token,
                    admin_chat_id,
                })
            }
            _ => None,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            database_url,
            run_migrations,
            port,
            telegram,
            log_format,
        })
    }
}
