//! Shared movie genre list, fetched at most once per store.
//!
//! A load first claims the store with an atomic flag. The claim is held
//! until the fetch finishes; if the fetch fails (or the loading future is
//! dropped) the claim is released so a later call can try again.

use crate::modules::catalog::models::Genre;
use crate::modules::catalog::TmdbAdapter;
use crate::modules::genre::domain::{GenreCacheState, LoadOutcome, UNKNOWN_GENRE};
use crate::shared::utils::Stopwatch;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct GenreStore {
    adapter: TmdbAdapter,
    claimed: AtomicBool,
    state: watch::Sender<GenreCacheState>,
}

/// Releases the claim on drop unless the load committed
struct LoadClaim<'a> {
    store: &'a GenreStore,
    committed: bool,
}

impl Drop for LoadClaim<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.store.state.send_replace(GenreCacheState::Empty);
            self.store.claimed.store(false, Ordering::Release);
        }
    }
}

impl GenreStore {
    pub fn new(adapter: TmdbAdapter) -> Self {
        let (state, _) = watch::channel(GenreCacheState::Empty);
        Self {
            adapter,
            claimed: AtomicBool::new(false),
            state,
        }
    }

    pub async fn load(&self) -> LoadOutcome {
        if self.genres().is_some() {
            return LoadOutcome::AlreadyLoaded;
        }
        if self
            .claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return match self.genres() {
                Some(_) => LoadOutcome::AlreadyLoaded,
                None => {
                    debug!("Genre load already in flight");
                    LoadOutcome::InFlight
                }
            };
        }

        let mut claim = LoadClaim {
            store: self,
            committed: false,
        };
        self.state.send_replace(GenreCacheState::Loading);

        let timer = Stopwatch::start("load_movie_genres");
        match self.adapter.movie_genres().await {
            Ok(genres) => {
                let count = genres.len();
                timer.finish_with(&format!("{} genres", count));
                info!("Loaded {} movie genres", count);
                self.state.send_replace(GenreCacheState::Ready(Arc::new(genres)));
                claim.committed = true;
                LoadOutcome::Loaded(count)
            }
            Err(err) => {
                warn!("Failed to load movie genres: {}", err);
                LoadOutcome::Failed(err.to_string())
            }
        }
    }

    /// Load if nobody has, or wait for the load someone else started.
    /// `None` when the load failed.
    pub async fn ensure_loaded(&self) -> Option<Arc<Vec<Genre>>> {
        match self.load().await {
            LoadOutcome::InFlight => self.wait_ready().await,
            _ => self.genres(),
        }
    }

    /// Wait while a load is in flight
    pub async fn wait_ready(&self) -> Option<Arc<Vec<Genre>>> {
        let mut rx = self.state.subscribe();
        let genres = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.genres().cloned(),
            Err(_) => None,
        };
        genres
    }

    pub fn genres(&self) -> Option<Arc<Vec<Genre>>> {
        self.state.borrow().genres().cloned()
    }

    pub fn state(&self) -> GenreCacheState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GenreCacheState> {
        self.state.subscribe()
    }

    pub fn genre_name(&self, id: u32) -> String {
        self.state.borrow().name_of(id)
    }

    /// Snapshot of the current names as a lookup closure
    pub fn name_lookup(&self) -> impl Fn(u32) -> String {
        let state = self.state();
        let names: HashMap<u32, String> = state
            .genres()
            .map(|genres| genres.iter().map(|g| (g.id, g.name.clone())).collect())
            .unwrap_or_default();
        move |id| {
            names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_GENRE.to_string())
        }
    }
}
