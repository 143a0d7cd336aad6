use crate::shared::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two catalog namespaces that own ids (`/movie/{id}`, `/tv/{id}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub fn path_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for MediaKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "tv" => Ok(MediaKind::Tv),
            other => Err(AppError::ValidationError(format!(
                "Unknown media kind: {}",
                other
            ))),
        }
    }
}

/// Kind of entity a view is asked about. Upcoming releases are movies as far as
/// the catalog is concerned, but they come from their own listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Movie,
    Tv,
    Upcoming,
}

impl EntityKind {
    pub fn media_kind(&self) -> MediaKind {
        match self {
            EntityKind::Movie | EntityKind::Upcoming => MediaKind::Movie,
            EntityKind::Tv => MediaKind::Tv,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Movie => "movie",
            EntityKind::Tv => "tv",
            EntityKind::Upcoming => "upcoming",
        }
    }
}

impl From<MediaKind> for EntityKind {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Movie => EntityKind::Movie,
            MediaKind::Tv => EntityKind::Tv,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(EntityKind::Movie),
            "tv" => Ok(EntityKind::Tv),
            // the web client spelled the route "Upcomming"
            "upcoming" | "upcomming" => Ok(EntityKind::Upcoming),
            other => Err(AppError::ValidationError(format!(
                "Unknown entity kind: {}",
                other
            ))),
        }
    }
}

/// Trending window for `/trending/movie/{window}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upcoming_resolves_to_movie_namespace() {
        assert_eq!(EntityKind::Upcoming.media_kind(), MediaKind::Movie);
        assert_eq!(EntityKind::Tv.media_kind(), MediaKind::Tv);
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!("Upcomming".parse::<EntityKind>().unwrap(), EntityKind::Upcoming);
        assert_eq!("TV".parse::<MediaKind>().unwrap(), MediaKind::Tv);
        assert!("person".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_default_window_is_week() {
        assert_eq!(TimeWindow::default().as_str(), "week");
    }
}
