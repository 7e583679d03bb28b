pub mod api;
pub mod notifier;
pub mod withdrawal;

pub use self::api::{DynWithdrawalApi, WithdrawalApiTrait};
pub use self::notifier::{DynNotifier, NotifierTrait};
pub use self::withdrawal::{
    DynWithdrawalRepository, DynWithdrawalService, WithdrawalRepositoryTrait,
    WithdrawalServiceTrait,
};
