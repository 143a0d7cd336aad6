pub mod repositories;
pub mod value_objects;

pub use repositories::CatalogTransport;
pub use value_objects::{CatalogEndpoint, EntityKind, MediaKind, TimeWindow};
