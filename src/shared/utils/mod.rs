pub mod logger;
pub mod validation;

pub use logger::{init_logger, LogContext, Stopwatch};
pub use validation::Validator;
