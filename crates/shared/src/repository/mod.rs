pub mod memory;
pub mod withdrawal;

pub use self::memory::InMemoryWithdrawalRepository;
pub use self::withdrawal::WithdrawalRepository;
