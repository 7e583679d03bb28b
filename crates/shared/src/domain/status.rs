use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Review state of a withdrawal request.
///
/// Every request starts as [`WithdrawalStatus::Pending`]. Neither of the
/// processed states is terminal: an operator can always send a request back
/// to review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
    Completed,
    Rejected,
}

/// Operator actions exposed by the review screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusAction {
    Complete,
    Reject,
    Revert,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {action} a request that is {from}")]
pub struct TransitionError {
    pub from: WithdrawalStatus,
    pub action: StatusAction,
}

impl WithdrawalStatus {
    pub const ALL: [WithdrawalStatus; 3] = [
        WithdrawalStatus::Pending,
        WithdrawalStatus::Completed,
        WithdrawalStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalStatus::Pending => "pending",
            WithdrawalStatus::Completed => "completed",
            WithdrawalStatus::Rejected => "rejected",
        }
    }

    pub fn is_processed(&self) -> bool {
        !matches!(self, WithdrawalStatus::Pending)
    }

    pub fn apply(self, action: StatusAction) -> Result<WithdrawalStatus, TransitionError> {
        use StatusAction::*;
        use WithdrawalStatus::*;

        match (self, action) {
            (Pending, Complete) => Ok(Completed),
            (Pending, Reject) => Ok(Rejected),
            (Completed, Revert) | (Rejected, Revert) => Ok(Pending),
            (from, action) => Err(TransitionError { from, action }),
        }
    }

    pub fn available_actions(&self) -> &'static [StatusAction] {
        match self {
            WithdrawalStatus::Pending => &[StatusAction::Complete, StatusAction::Reject],
            WithdrawalStatus::Completed | WithdrawalStatus::Rejected => &[StatusAction::Revert],
        }
    }
}

impl fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown withdrawal status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for WithdrawalStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(WithdrawalStatus::Pending),
            "completed" => Ok(WithdrawalStatus::Completed),
            "rejected" => Ok(WithdrawalStatus::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            StatusAction::Complete => "complete",
            StatusAction::Reject => "reject",
            StatusAction::Revert => "revert",
        };
        f.pad(verb)
    }
}

/// Status as read back from storage or the wire.
///
/// Values outside the closed enum are kept verbatim so they can still be
/// shown, but they have no transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum StatusLabel {
    Known(WithdrawalStatus),
    Other(String),
}

impl StatusLabel {
    pub fn known(&self) -> Option<WithdrawalStatus> {
        match self {
            StatusLabel::Known(status) => Some(*status),
            StatusLabel::Other(_) => None,
        }
    }

    pub fn is(&self, status: WithdrawalStatus) -> bool {
        self.known() == Some(status)
    }

    pub fn available_actions(&self) -> &'static [StatusAction] {
        match self {
            StatusLabel::Known(status) => status.available_actions(),
            StatusLabel::Other(_) => &[],
        }
    }
}

impl From<WithdrawalStatus> for StatusLabel {
    fn from(value: WithdrawalStatus) -> Self {
        StatusLabel::Known(value)
    }
}

impl From<&str> for StatusLabel {
    fn from(value: &str) -> Self {
        value
            .parse::<WithdrawalStatus>()
            .map(StatusLabel::Known)
            .unwrap_or_else(|_| StatusLabel::Other(value.to_string()))
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLabel::Known(status) => status.fmt(f),
            StatusLabel::Other(raw) => f.pad(raw),
        }
    }
}

/// Listing filter: every request, or only those in one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(WithdrawalStatus),
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn status(&self) -> Option<WithdrawalStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(*status),
        }
    }

    pub fn matches(&self, label: &StatusLabel) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => label.is(*status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
