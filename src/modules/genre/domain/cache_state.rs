use crate::modules::catalog::models::Genre;
use std::sync::Arc;

/// Name used for genre ids the cache does not know (or before it loads)
pub const UNKNOWN_GENRE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GenreCacheState {
    #[default]
    Empty,
    Loading,
    Ready(Arc<Vec<Genre>>),
}

impl GenreCacheState {
    pub fn genres(&self) -> Option<&Arc<Vec<Genre>>> {
        match self {
            GenreCacheState::Ready(genres) => Some(genres),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, GenreCacheState::Loading)
    }

    /// Look up a genre name, falling back to `UNKNOWN_GENRE`
    pub fn name_of(&self, id: u32) -> String {
        self.genres()
            .and_then(|genres| genres.iter().find(|g| g.id == id))
            .map(|g| g.name.clone())
            .unwrap_or_else(|| UNKNOWN_GENRE.to_string())
    }
}

/// What a call to `GenreStore::load` ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    AlreadyLoaded,
    /// Another caller holds the load; nothing was issued
    InFlight,
    Loaded(usize),
    Failed(String),
}
