pub mod application;
pub mod domain;

pub use application::GenreStore;
pub use domain::{GenreCacheState, LoadOutcome, UNKNOWN_GENRE};
