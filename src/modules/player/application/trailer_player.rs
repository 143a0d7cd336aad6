//! Owner of the one trailer modal that may be open at a time.

use crate::modules::aggregation::domain::entities::ResolvedTrailer;
use crate::modules::player::domain::{TrailerModalData, MISSING_KEY_MESSAGE};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Handle to an opened modal. Closing it (or opening another modal) marks
/// it closed for every clone.
#[derive(Debug, Clone)]
pub struct TrailerHandle {
    id: u64,
    data: TrailerModalData,
    open: Arc<AtomicBool>,
}

impl TrailerHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn data(&self) -> &TrailerModalData {
        &self.data
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub fn embed_url(&self) -> Option<String> {
        self.data.embed_url().ok()
    }

    /// Set when the modal has nothing to play
    pub fn error_message(&self) -> Option<&'static str> {
        self.data.embed_url().err()
    }

    fn close(&self) {
        self.open.store(false, Ordering::Release);
    }
}

#[derive(Default)]
pub struct TrailerPlayer {
    current: Mutex<Option<TrailerHandle>>,
    next_id: AtomicU64,
}

impl TrailerPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<TrailerHandle>> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Open a modal, closing the one already open
    pub fn open(&self, data: TrailerModalData) -> TrailerHandle {
        let mut slot = self.slot();
        if let Some(previous) = slot.take() {
            debug!("Closing trailer modal #{} before opening another", previous.id);
            previous.close();
        }

        let handle = TrailerHandle {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            data,
            open: Arc::new(AtomicBool::new(true)),
        };
        info!("Opening trailer modal #{} for {}", handle.id, handle.data.title);
        *slot = Some(handle.clone());
        handle
    }

    /// Open the modal for a resolved trailer. Without one this only logs.
    pub fn play(
        &self,
        trailer: Option<&ResolvedTrailer>,
        title: &str,
        poster_path: Option<&str>,
    ) -> Option<TrailerHandle> {
        let Some(trailer) = trailer else {
            info!("No trailer available for {}: {}", title, MISSING_KEY_MESSAGE);
            return None;
        };
        Some(self.open(TrailerModalData::new(
            title,
            Some(trailer.key.clone()),
            poster_path.map(str::to_string),
        )))
    }

    pub fn close_current(&self) {
        if let Some(handle) = self.slot().take() {
            debug!("Closing trailer modal #{}", handle.id);
            handle.close();
        }
    }

    /// The open modal, if any
    pub fn current(&self) -> Option<TrailerHandle> {
        self.slot().clone().filter(TrailerHandle::is_open)
    }
}
