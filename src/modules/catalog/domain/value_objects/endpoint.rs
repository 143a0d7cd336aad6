//! Catalogue of the upstream endpoints the engine consumes
//!
//! Every variant knows its path (relative to the API base) and the query it
//! sends. The API key is never part of this: it is added by the transport's
//! interceptor.

use super::media_kind::{MediaKind, TimeWindow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogEndpoint {
    /// `/discover/{movie|tv}` sorted by popularity. A region narrows movie
    /// discovery to titles released and watchable there.
    Discover {
        kind: MediaKind,
        page: u32,
        region: Option<String>,
    },
    TrendingMovies {
        window: TimeWindow,
    },
    TrendingPeople,
    Details {
        kind: MediaKind,
        id: u64,
    },
    Credits {
        kind: MediaKind,
        id: u64,
    },
    Videos {
        kind: MediaKind,
        id: u64,
    },
    Similar {
        kind: MediaKind,
        id: u64,
        page: u32,
    },
    NowPlaying {
        page: u32,
        region: Option<String>,
    },
    AiringToday {
        page: u32,
    },
    Upcoming {
        page: u32,
    },
    MovieGenres,
}

impl CatalogEndpoint {
    pub fn path(&self) -> String {
        match self {
            CatalogEndpoint::Discover { kind, .. } => format!("/discover/{}", kind.path_segment()),
            CatalogEndpoint::TrendingMovies { window } => {
                format!("/trending/movie/{}", window.as_str())
            }
            CatalogEndpoint::TrendingPeople => "/trending/person/week".to_string(),
            CatalogEndpoint::Details { kind, id } => format!("/{}/{}", kind.path_segment(), id),
            CatalogEndpoint::Credits { kind, id } => {
                format!("/{}/{}/credits", kind.path_segment(), id)
            }
            CatalogEndpoint::Videos { kind, id } => {
                format!("/{}/{}/videos", kind.path_segment(), id)
            }
            CatalogEndpoint::Similar { kind, id, .. } => {
                format!("/{}/{}/similar", kind.path_segment(), id)
            }
            CatalogEndpoint::NowPlaying { .. } => "/movie/now_playing".to_string(),
            CatalogEndpoint::AiringToday { .. } => "/tv/airing_today".to_string(),
            CatalogEndpoint::Upcoming { .. } => "/movie/upcoming".to_string(),
            CatalogEndpoint::MovieGenres => "/genre/movie/list".to_string(),
        }
    }

    /// Query parameters in the order they are sent. `language` always leads.
    pub fn query(&self, language: &str) -> Vec<(String, String)> {
        let mut params = vec![("language".to_string(), language.to_string())];
        let mut push = |key: &str, value: String| params.push((key.to_string(), value));

        match self {
            CatalogEndpoint::Discover { kind, page, region } => {
                push("page", page.to_string());
                if let (MediaKind::Movie, Some(region)) = (kind, region) {
                    push("region", region.clone());
                    push("sort_by", "popularity.desc".to_string());
                    push("watch_region", region.clone());
                    push("with_origin_country", region.clone());
                } else {
                    push("sort_by", "popularity.desc".to_string());
                }
            }
            CatalogEndpoint::NowPlaying { page, region } => {
                push("page", page.to_string());
                if let Some(region) = region {
                    push("region", region.clone());
                }
            }
            CatalogEndpoint::Similar { page, .. }
            | CatalogEndpoint::AiringToday { page }
            | CatalogEndpoint::Upcoming { page } => push("page", page.to_string()),
            CatalogEndpoint::TrendingMovies { .. }
            | CatalogEndpoint::TrendingPeople
            | CatalogEndpoint::Details { .. }
            | CatalogEndpoint::Credits { .. }
            | CatalogEndpoint::Videos { .. }
            | CatalogEndpoint::MovieGenres => {}
        }

        params
    }

    /// Short name used in logs
    pub fn label(&self) -> &'static str {
        match self {
            CatalogEndpoint::Discover { .. } => "discover",
            CatalogEndpoint::TrendingMovies { .. } => "trending-movies",
            CatalogEndpoint::TrendingPeople => "trending-people",
            CatalogEndpoint::Details { .. } => "details",
            CatalogEndpoint::Credits { .. } => "credits",
            CatalogEndpoint::Videos { .. } => "videos",
            CatalogEndpoint::Similar { .. } => "similar",
            CatalogEndpoint::NowPlaying { .. } => "now-playing",
            CatalogEndpoint::AiringToday { .. } => "airing-today",
            CatalogEndpoint::Upcoming { .. } => "upcoming",
            CatalogEndpoint::MovieGenres => "genres",
        }
    }
}
