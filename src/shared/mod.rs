// Shared kernel: cross-cutting types used by every bounded context

pub mod application; // Paging model
pub mod config; // Environment-driven configuration
pub mod errors; // Shared error types
pub mod utils; // Logging and validation helpers

pub use config::AppConfig;
pub use errors::{AppError, AppResult};
