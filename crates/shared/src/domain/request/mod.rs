pub mod withdrawal;

pub use self::withdrawal::{
    CreateWithdrawalRequest, FindAllWithdrawalRequest, UpdateWithdrawalStatusRequest,
};
