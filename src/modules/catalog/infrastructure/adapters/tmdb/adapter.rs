use crate::modules::catalog::domain::{CatalogEndpoint, CatalogTransport, MediaKind};
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::models::*;

/// Decoded body of any catalog endpoint, tagged by shape
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogPayload {
    Details(MediaDetails),
    Credits(CreditsResponse),
    Videos(VideosResponse),
    Page(TmdbPage<TmdbMediaItem>),
    Genres(Vec<Genre>),
}

/// Typed access to the TMDB REST API on top of a [`CatalogTransport`]
#[derive(Clone)]
pub struct TmdbAdapter {
    transport: Arc<dyn CatalogTransport>,
    language: String,
    region: String,
}

impl TmdbAdapter {
    pub fn new(transport: Arc<dyn CatalogTransport>, config: &AppConfig) -> Self {
        Self {
            transport,
            language: config.language.clone(),
            region: config.region.clone(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &CatalogEndpoint) -> AppResult<T> {
        let query = endpoint.query(&self.language);
        let value = self.transport.get_json(&endpoint.path(), &query).await?;

        serde_json::from_value(value).map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to decode TMDB {} response: {}",
                endpoint.label(),
                e
            ))
        })
    }

    /// Fetch any endpoint and decode it into the matching payload shape
    pub async fn fetch(&self, endpoint: &CatalogEndpoint) -> AppResult<CatalogPayload> {
        match endpoint {
            CatalogEndpoint::Details { kind, .. } => match kind {
                MediaKind::Movie => Ok(CatalogPayload::Details(MediaDetails::Movie(
                    self.get(endpoint).await?,
                ))),
                MediaKind::Tv => Ok(CatalogPayload::Details(MediaDetails::Tv(
                    self.get(endpoint).await?,
                ))),
            },
            CatalogEndpoint::Credits { .. } => {
                Ok(CatalogPayload::Credits(self.get(endpoint).await?))
            }
            CatalogEndpoint::Videos { .. } => {
                Ok(CatalogPayload::Videos(self.get(endpoint).await?))
            }
            CatalogEndpoint::MovieGenres => {
                let list: GenreListResponse = self.get(endpoint).await?;
                Ok(CatalogPayload::Genres(list.genres))
            }
            CatalogEndpoint::Discover { .. }
            | CatalogEndpoint::TrendingMovies { .. }
            | CatalogEndpoint::TrendingPeople
            | CatalogEndpoint::Similar { .. }
            | CatalogEndpoint::NowPlaying { .. }
            | CatalogEndpoint::AiringToday { .. }
            | CatalogEndpoint::Upcoming { .. } => {
                Ok(CatalogPayload::Page(self.get(endpoint).await?))
            }
        }
    }

    pub async fn movie_genres(&self) -> AppResult<Vec<Genre>> {
        let list: GenreListResponse = self.get(&CatalogEndpoint::MovieGenres).await?;
        Ok(list.genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::domain::repositories::MockCatalogTransport;
    use serde_json::json;

    fn adapter(mock: MockCatalogTransport) -> TmdbAdapter {
        TmdbAdapter::new(Arc::new(mock), &AppConfig::new("key"))
    }

    #[tokio::test]
    async fn test_details_decodes_by_kind() {
        let mut mock = MockCatalogTransport::new();
        mock.expect_get_json()
            .withf(|path, _| path == "/tv/1399")
            .times(1)
            .returning(|_, _| Ok(json!({ "id": 1399, "name": "Game of Thrones" })));

        let payload = adapter(mock)
            .fetch(&CatalogEndpoint::Details {
                kind: MediaKind::Tv,
                id: 1399,
            })
            .await
            .unwrap();
        assert!(matches!(
            payload,
            CatalogPayload::Details(MediaDetails::Tv(ref t))
                if t.name.as_deref() == Some("Game of Thrones")
        ));
    }

    #[tokio::test]
    async fn test_discover_movies_sends_region_params() {
        let mut mock = MockCatalogTransport::new();
        mock.expect_get_json()
            .withf(|path, query| {
                let expected = [
                    ("language", "en-US"),
                    ("page", "3"),
                    ("region", "IN"),
                    ("sort_by", "popularity.desc"),
                    ("watch_region", "IN"),
                    ("with_origin_country", "IN"),
                ];
                path == "/discover/movie"
                    && query.len() == expected.len()
                    && query
                        .iter()
                        .zip(expected.iter())
                        .all(|((k, v), (ek, ev))| k.as_str() == *ek && v.as_str() == *ev)
            })
            .times(1)
            .returning(|_, _| Ok(json!({ "page": 3, "results": [], "total_pages": 10 })));

        let endpoint = CatalogEndpoint::Discover {
            kind: MediaKind::Movie,
            page: 3,
            region: Some("IN".to_string()),
        };
        match adapter(mock).fetch(&endpoint).await.unwrap() {
            CatalogPayload::Page(page) => assert_eq!(page.total_pages, 10),
            other => panic!("expected a page, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_errors_pass_through() {
        let mut mock = MockCatalogTransport::new();
        mock.expect_get_json()
            .returning(|_, _| {
                Err(AppError::NotFound(
                    "The resource you requested could not be found.".into(),
                ))
            });

        let err = adapter(mock)
            .fetch(&CatalogEndpoint::Credits {
                kind: MediaKind::Movie,
                id: 1,
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AppError::NotFound("The resource you requested could not be found.".into())
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_serialization_error() {
        let mut mock = MockCatalogTransport::new();
        mock.expect_get_json()
            .returning(|_, _| Ok(json!({ "genres": "nope" })));

        let err = adapter(mock).movie_genres().await.unwrap_err();
        assert!(matches!(err, AppError::SerializationError(_)));
    }
}
