use serde::{Deserialize, Serialize};

// Response envelopes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbPage<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Default for TmdbPage<T> {
    fn default() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbError {
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub success: Option<bool>,
}

/// Listing entry as returned by discover, trending, similar and the
/// now-playing style endpoints. Movies carry `title`/`release_date`, shows
/// carry `name`/`first_air_date`, people carry `profile_path`. Which one it
/// is gets decided once, by the projector, from `media_type` or the
/// endpoint's kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmdbMediaItem {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub popularity: Option<f32>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub media_type: Option<String>, // "movie", "tv", "person" on trending
    #[serde(default)]
    pub known_for_department: Option<String>,
}

// Details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub vote_count: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub homepage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvShowDetails {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub last_air_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>, // "Returning Series", "Ended", "Canceled"
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub vote_count: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub created_by: Vec<Creator>,
    #[serde(default)]
    pub homepage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Either shape of `/movie/{id}` or `/tv/{id}`. Consumers match on it
/// instead of probing optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaDetails {
    Movie(MovieDetails),
    Tv(TvShowDetails),
}

impl MediaDetails {
    pub fn id(&self) -> u64 {
        match self {
            MediaDetails::Movie(m) => m.id,
            MediaDetails::Tv(t) => t.id,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            MediaDetails::Movie(m) => m.title.as_deref(),
            MediaDetails::Tv(_) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            MediaDetails::Movie(_) => None,
            MediaDetails::Tv(t) => t.name.as_deref(),
        }
    }

    pub fn poster_path(&self) -> Option<&str> {
        match self {
            MediaDetails::Movie(m) => m.poster_path.as_deref(),
            MediaDetails::Tv(t) => t.poster_path.as_deref(),
        }
    }

    pub fn backdrop_path(&self) -> Option<&str> {
        match self {
            MediaDetails::Movie(m) => m.backdrop_path.as_deref(),
            MediaDetails::Tv(t) => t.backdrop_path.as_deref(),
        }
    }

    /// Release date for movies, first air date for shows
    pub fn date(&self) -> Option<&str> {
        match self {
            MediaDetails::Movie(m) => m.release_date.as_deref(),
            MediaDetails::Tv(t) => t.first_air_date.as_deref(),
        }
    }

    pub fn genres(&self) -> &[Genre] {
        match self {
            MediaDetails::Movie(m) => &m.genres,
            MediaDetails::Tv(t) => &t.genres,
        }
    }
}

// Credits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditsResponse {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

// Videos
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideosResponse {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub key: String,  // YouTube video ID
    pub site: String, // "YouTube", "Vimeo"
    pub r#type: String, // "Trailer", "Teaser", "Clip", "Featurette"
    #[serde(default)]
    pub official: bool,
    #[serde(default)]
    pub published_at: Option<String>,
}

// Genres
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<Genre>,
}
