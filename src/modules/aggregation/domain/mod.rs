pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::{FetchTask, Request, TaskKind, TaskOutcome, UpstreamResults};
pub use errors::{AggregationError, Outcome};
pub use services::{FetchPlanner, JoinSelect};
pub use value_objects::EntityId;
