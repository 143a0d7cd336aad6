//! YouTube URL construction for trailer keys

pub const THUMBNAIL_PLACEHOLDER: &str = "https://via.placeholder.com/320x180.png?text=No+Trailer";

const PLAYER_PARAMS: &str = "autoplay=0&controls=1&showinfo=0&rel=0&modestbranding=1";

pub fn embed_url(key: &str) -> String {
    format!("https://www.youtube.com/embed/{}", key)
}

/// Embed URL with the modal player's parameters
pub fn player_embed_url(key: &str) -> String {
    format!("{}?{}", embed_url(key), PLAYER_PARAMS)
}

pub fn watch_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", key)
}

pub fn thumbnail_url(key: Option<&str>) -> String {
    match key.filter(|k| !k.is_empty()) {
        Some(key) => format!("https://img.youtube.com/vi/{}/mqdefault.jpg", key),
        None => THUMBNAIL_PLACEHOLDER.to_string(),
    }
}
