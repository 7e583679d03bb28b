mod di;
mod errors;
mod logger;
mod metrics;

pub use self::di::DependenciesInject;
pub use self::errors::{ApiError, AppError};
pub use self::logger::{LogFormat, init_logger};
pub use self::metrics::{Method, MethodLabels, Metrics, Status};
