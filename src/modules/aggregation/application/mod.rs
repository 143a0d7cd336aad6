pub mod aggregation;
pub mod engine;
pub mod lifecycle_controller;
pub mod services;
pub mod task_executor;

pub use aggregation::Aggregation;
pub use engine::{AggregationEngine, Gathered};
pub use lifecycle_controller::{LifecycleController, ViewState};
pub use services::{DetailAggregation, HeroAggregation, ListingAggregation, TrailersAggregation};
pub use task_executor::TaskExecutor;
