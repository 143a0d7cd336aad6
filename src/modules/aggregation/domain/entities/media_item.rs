use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f32>,
    pub genre_ids: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvSummary {
    pub id: u64,
    pub name: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f32>,
    pub genre_ids: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub id: u64,
    pub name: String,
    pub profile_path: Option<String>,
    pub known_for_department: Option<String>,
}

/// A listing entry after projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum MediaItem {
    Movie(MovieSummary),
    Tv(TvSummary),
    Person(PersonSummary),
}

impl MediaItem {
    pub fn id(&self) -> u64 {
        match self {
            MediaItem::Movie(m) => m.id,
            MediaItem::Tv(t) => t.id,
            MediaItem::Person(p) => p.id,
        }
    }

    pub fn display_title(&self) -> &str {
        match self {
            MediaItem::Movie(m) => &m.title,
            MediaItem::Tv(t) => &t.name,
            MediaItem::Person(p) => &p.name,
        }
    }

    pub fn poster_path(&self) -> Option<&str> {
        match self {
            MediaItem::Movie(m) => m.poster_path.as_deref(),
            MediaItem::Tv(t) => t.poster_path.as_deref(),
            MediaItem::Person(p) => p.profile_path.as_deref(),
        }
    }

    pub fn backdrop_path(&self) -> Option<&str> {
        match self {
            MediaItem::Movie(m) => m.backdrop_path.as_deref(),
            MediaItem::Tv(t) => t.backdrop_path.as_deref(),
            MediaItem::Person(_) => None,
        }
    }

    /// Release date for movies, first air date for shows
    pub fn date(&self) -> Option<&str> {
        match self {
            MediaItem::Movie(m) => m.release_date.as_deref(),
            MediaItem::Tv(t) => t.first_air_date.as_deref(),
            MediaItem::Person(_) => None,
        }
    }

    pub fn vote_average(&self) -> Option<f32> {
        match self {
            MediaItem::Movie(m) => m.vote_average,
            MediaItem::Tv(t) => t.vote_average,
            MediaItem::Person(_) => None,
        }
    }

    pub fn genre_ids(&self) -> &[u32] {
        match self {
            MediaItem::Movie(m) => &m.genre_ids,
            MediaItem::Tv(t) => &t.genre_ids,
            MediaItem::Person(_) => &[],
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            MediaItem::Movie(_) => "movie",
            MediaItem::Tv(_) => "tv",
            MediaItem::Person(_) => "person",
        }
    }
}
