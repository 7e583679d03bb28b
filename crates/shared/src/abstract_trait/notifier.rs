use async_trait::async_trait;
use std::sync::Arc;

use crate::model::withdrawal::Withdrawal;

pub type DynNotifier = Arc<dyn NotifierTrait + Send + Sync>;

/// Operator alert for a freshly stored withdrawal request. Delivery is best
/// effort: implementations log failures instead of returning them.
#[async_trait]
pub trait NotifierTrait {
    async fn notify_created(&self, withdrawal: &Withdrawal, submitted_at: Option<&str>);
}
