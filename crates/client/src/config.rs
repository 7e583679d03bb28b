use clap::Args;
use std::time::Duration;

/// Where the two remote resources live and how long to wait for them.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Withdrawal collection resource (list, show, status update).
    #[arg(
        long,
        env = "WITHDRAWALS_URL",
        default_value = "http://localhost:8080/api/withdrawals"
    )]
    pub withdrawals_url: String,

    /// Submission resource.
    #[arg(
        long,
        env = "SUBMISSION_URL",
        default_value = "http://localhost:8080/api/withdraw"
    )]
    pub submission_url: String,

    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(withdrawals_url: impl Into<String>, submission_url: impl Into<String>) -> Self {
        Self {
            withdrawals_url: withdrawals_url.into(),
            submission_url: submission_url.into(),
            timeout_secs: 30,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
