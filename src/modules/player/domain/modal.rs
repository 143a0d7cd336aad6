use super::youtube;
use serde::{Deserialize, Serialize};

pub const MISSING_KEY_MESSAGE: &str = "No trailer key provided for playback.";

/// What the trailer modal is opened with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerModalData {
    pub title: String,
    pub trailer_key: Option<String>,
    pub poster_path: Option<String>,
}

impl TrailerModalData {
    pub fn new(
        title: impl Into<String>,
        trailer_key: Option<String>,
        poster_path: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            trailer_key: trailer_key.filter(|k| !k.is_empty()),
            poster_path,
        }
    }

    /// Player URL, or the error the modal should show instead
    pub fn embed_url(&self) -> Result<String, &'static str> {
        self.trailer_key
            .as_deref()
            .map(youtube::player_embed_url)
            .ok_or(MISSING_KEY_MESSAGE)
    }
}
