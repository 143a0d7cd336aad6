use crate::modules::aggregation::domain::errors::AggregationError;
use crate::modules::aggregation::domain::value_objects::EntityId;
use crate::modules::catalog::{EntityKind, MediaKind, TimeWindow};
use crate::shared::utils::Validator;
use serde::{Deserialize, Serialize};

/// One aggregation a view asks for. Immutable once issued; issuing another
/// on the same controller supersedes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Request {
    /// Details, credits and videos of one title
    Detail { id: EntityId, kind: EntityKind },
    /// Titles similar to one title
    Similar {
        id: EntityId,
        kind: MediaKind,
        page: u32,
    },
    /// Trailer carousel for a category
    Trailers { category: EntityKind },
    Popular { kind: MediaKind, page: u32 },
    Trending { window: TimeWindow },
    TrendingPeople,
    /// Home hero slides
    Hero,
}

impl Request {
    /// Detail request from a raw route parameter. Rejected ids never reach
    /// the planner.
    pub fn detail(raw_id: Option<&str>, kind: EntityKind) -> Result<Self, AggregationError> {
        Ok(Request::Detail {
            id: EntityId::parse(raw_id)?,
            kind,
        })
    }

    pub fn similar(
        raw_id: Option<&str>,
        kind: MediaKind,
        page: u32,
    ) -> Result<Self, AggregationError> {
        Ok(Request::Similar {
            id: EntityId::parse(raw_id)?,
            kind,
            page: list_page(page)?,
        })
    }

    pub fn popular(kind: MediaKind, page: u32) -> Result<Self, AggregationError> {
        Ok(Request::Popular {
            kind,
            page: list_page(page)?,
        })
    }

    pub fn trailers(category: EntityKind) -> Self {
        Request::Trailers { category }
    }

    pub fn trending(window: TimeWindow) -> Self {
        Request::Trending { window }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Request::Detail { .. } => "detail",
            Request::Similar { .. } => "similar",
            Request::Trailers { .. } => "trailers",
            Request::Popular { .. } => "popular",
            Request::Trending { .. } => "trending",
            Request::TrendingPeople => "trending-people",
            Request::Hero => "hero",
        }
    }

    /// List contexts may settle as `Empty`; entity contexts may not
    pub fn is_list(&self) -> bool {
        !matches!(self, Request::Detail { .. })
    }
}

fn list_page(page: u32) -> Result<u32, AggregationError> {
    Validator::validate_page(page).map_err(|e| {
        AggregationError::InvalidRequest(e.message().unwrap_or("Invalid page.").to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_detail_rejects_bad_ids_before_planning() {
        assert_eq!(
            Request::detail(Some("abc"), EntityKind::Movie),
            Err(AggregationError::InvalidRequest("Invalid ID.".to_string()))
        );
        let request = assert_ok!(Request::detail(Some("42"), EntityKind::Tv));
        assert!(matches!(
            request,
            Request::Detail { id, kind: EntityKind::Tv } if id.value() == 42
        ));
        assert!(!request.is_list());
    }

    #[test]
    fn test_list_pages_must_be_positive() {
        assert_err!(Request::popular(MediaKind::Movie, 0));
        assert!(assert_ok!(Request::popular(MediaKind::Tv, 3)).is_list());

        assert_eq!(
            Request::similar(Some("550"), MediaKind::Movie, 0),
            Err(AggregationError::InvalidRequest(
                "Page numbers start at 1".to_string()
            ))
        );
        assert!(matches!(
            assert_ok!(Request::similar(Some("550"), MediaKind::Tv, 2)),
            Request::Similar { page: 2, .. }
        ));
    }
}
