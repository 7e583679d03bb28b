use shared::{
    abstract_trait::DynWithdrawalApi,
    domain::{
        response::{WithdrawalResponse, WithdrawalStats},
        status::{StatusAction, StatusFilter, TransitionError, WithdrawalStatus},
    },
    utils::ApiError,
};
use thiserror::Error;
use tracing::{error, info};

use crate::notice::Notice;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReviewError {
    #[error("request #{0} is not on the board")]
    NotListed(i32),

    #[error("request #{id} has status '{status}' which has no transitions")]
    NoTransitions { id: i32, status: String },

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Operator view over the withdrawal collection.
///
/// Rows follow the active filter. Stats always cover every request.
pub struct ReviewBoard {
    api: DynWithdrawalApi,
    filter: StatusFilter,
    records: Vec<WithdrawalResponse>,
    stats: WithdrawalStats,
    notice: Option<Notice>,
}

impl std::fmt::Debug for ReviewBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewBoard")
            .field("filter", &self.filter)
            .field("records", &self.records.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl ReviewBoard {
    pub fn new(api: DynWithdrawalApi) -> Self {
        Self {
            api,
            filter: StatusFilter::All,
            records: Vec::new(),
            stats: WithdrawalStats::default(),
            notice: None,
        }
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn records(&self) -> &[WithdrawalResponse] {
        &self.records
    }

    pub fn stats(&self) -> WithdrawalStats {
        self.stats
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn record(&self, id: i32) -> Option<&WithdrawalResponse> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Reloads the rows for the active filter. On failure the rows already on
    /// the board stay as they were.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        match self.fetch().await {
            Ok((records, stats)) => {
                info!(
                    "📋 [Review] Loaded {} rows - filter: {}",
                    records.len(),
                    self.filter
                );
                self.records = records;
                self.stats = stats;
                Ok(())
            }
            Err(e) => {
                error!("❌ [Review] Failed to load withdrawals: {e}");
                self.notice = Some(Notice::error("Loading failed", "Could not load requests"));
                Err(e)
            }
        }
    }

    async fn fetch(&self) -> Result<(Vec<WithdrawalResponse>, WithdrawalStats), ApiError> {
        let records = self.api.list(self.filter).await?;

        let stats = match self.filter {
            StatusFilter::All => WithdrawalStats::from_records(&records),
            StatusFilter::Only(_) => {
                WithdrawalStats::from_records(&self.api.list(StatusFilter::All).await?)
            }
        };

        Ok((records, stats))
    }

    pub async fn set_filter(&mut self, filter: StatusFilter) -> Result<(), ApiError> {
        self.filter = filter;
        self.refresh().await
    }

    /// Runs an operator action on a listed request.
    ///
    /// The transition is checked locally first; a disallowed action never
    /// reaches the server. A successful update reloads the board.
    pub async fn apply_action(
        &mut self,
        id: i32,
        action: StatusAction,
    ) -> Result<WithdrawalStatus, ReviewError> {
        let record = self.record(id).ok_or(ReviewError::NotListed(id))?;

        let current = record
            .status
            .known()
            .ok_or_else(|| ReviewError::NoTransitions {
                id,
                status: record.status.to_string(),
            })?;

        let target = current.apply(action)?;

        if let Err(e) = self.api.update_status(id, target).await {
            error!("❌ [Review] Failed to move #{id} to {target}: {e}");
            self.notice = Some(Notice::error(
                "Error",
                e.server_message().unwrap_or("Could not update status"),
            ));
            return Err(e.into());
        }

        info!("✅ [Review] Request #{id} moved to {target}");

        // A failed reload leaves its own notice in place.
        if self.refresh().await.is_ok() {
            self.notice = Some(Notice::success(
                "Status updated",
                format!("Request #{id} moved to \"{target}\""),
            ));
        }

        Ok(target)
    }
}
