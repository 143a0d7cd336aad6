pub mod cache_state;

pub use cache_state::{GenreCacheState, LoadOutcome, UNKNOWN_GENRE};
