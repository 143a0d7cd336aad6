pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use domain::{CatalogEndpoint, CatalogTransport, EntityKind, MediaKind, TimeWindow};
pub use infrastructure::adapters::tmdb::{models, CatalogPayload, TmdbAdapter};
pub use infrastructure::http_client::{ApiKeyInterceptor, RateLimitClient, RetryPolicy};
pub use infrastructure::images::{ImageResolver, ImageSize};
