//! Image URL resolution against the catalog CDN

use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/500x750.png?text=No+Image";
pub const PLACEHOLDER_PERSON: &str = "assets/images/placeholder_person.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSize {
    W185,
    W300,
    W500,
    W780,
    W1280,
    Original,
}

impl ImageSize {
    pub fn token(&self) -> &'static str {
        match self {
            ImageSize::W185 => "w185",
            ImageSize::W300 => "w300",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::W1280 => "w1280",
            ImageSize::Original => "original",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageResolver {
    base: String,
}

impl ImageResolver {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        let base = if base.ends_with('/') {
            base
        } else {
            format!("{}/", base)
        };
        Self { base }
    }

    /// `{base}{size}{path}`, or the fixed placeholder when there is no path
    pub fn full_url(&self, path: Option<&str>, size: ImageSize) -> String {
        match path.filter(|p| !p.trim().is_empty()) {
            Some(path) => format!("{}{}{}", self.base, size.token(), path),
            None => PLACEHOLDER_IMAGE.to_string(),
        }
    }

    /// Cast and people portraits. A missing portrait uses the person placeholder.
    pub fn profile_url(&self, path: Option<&str>) -> String {
        match path.filter(|p| !p.trim().is_empty()) {
            Some(path) => format!("{}{}{}", self.base, ImageSize::W185.token(), path),
            None => PLACEHOLDER_PERSON.to_string(),
        }
    }
}
