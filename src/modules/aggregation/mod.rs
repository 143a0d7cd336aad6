pub mod application;
pub mod domain;

// Re-exports for easy external access
pub use application::{
    Aggregation, AggregationEngine, DetailAggregation, HeroAggregation, LifecycleController,
    ListingAggregation, TrailersAggregation, ViewState,
};
pub use domain::entities::{
    CardListView, DetailView, HeroCarousel, HeroView, MediaCard, MediaItem, ResolvedTrailer,
    TrailerCard, TrailerListView,
};
pub use domain::{AggregationError, EntityId, Outcome, Request};
