mod database;
mod myconfig;
mod telegram;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::myconfig::{Config, TelegramConfig};
pub use self::telegram::{NoopNotifier, TelegramNotifier};
