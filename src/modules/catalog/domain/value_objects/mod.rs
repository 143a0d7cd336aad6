pub mod endpoint;
pub mod media_kind;

pub use endpoint::CatalogEndpoint;
pub use media_kind::{EntityKind, MediaKind, TimeWindow};
