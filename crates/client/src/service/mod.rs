mod withdrawal;

pub use self::withdrawal::HttpWithdrawalApi;
