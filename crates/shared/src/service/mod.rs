pub mod withdrawal;

pub use self::withdrawal::WithdrawalService;
