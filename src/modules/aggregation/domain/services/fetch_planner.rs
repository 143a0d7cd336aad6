//! Describes the upstream work a request needs. Performs no I/O.

use crate::modules::aggregation::domain::entities::{FetchTask, Request, TaskKind};
use crate::modules::catalog::{CatalogEndpoint, EntityKind, MediaKind, TimeWindow};

/// Items of a trailer carousel that get a videos lookup
pub const TRAILER_ITEM_CAP: usize = 10;

/// Trending movies shown in the hero
pub const HERO_SLIDE_CAP: usize = 8;

/// Work issued only after the independent tasks settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependentRule {
    /// One videos task per listing item, at most `cap` items
    VideosPerItem { kind: MediaKind, cap: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchPlan {
    /// Launched immediately, concurrently
    pub independent: Vec<FetchTask>,
    pub dependent: Option<DependentRule>,
}

#[derive(Debug, Clone)]
pub struct FetchPlanner {
    region: String,
}

impl FetchPlanner {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }

    pub fn plan(&self, request: &Request) -> FetchPlan {
        match request {
            Request::Detail { id, kind } => {
                let kind = kind.media_kind();
                let id = id.value();
                FetchPlan {
                    independent: vec![
                        FetchTask::new(0, TaskKind::Details, CatalogEndpoint::Details { kind, id }),
                        FetchTask::new(1, TaskKind::Credits, CatalogEndpoint::Credits { kind, id }),
                        FetchTask::new(2, TaskKind::Videos, CatalogEndpoint::Videos { kind, id }),
                    ],
                    dependent: None,
                }
            }
            Request::Similar { id, kind, page } => Self::single(
                TaskKind::Similar,
                CatalogEndpoint::Similar {
                    kind: *kind,
                    id: id.value(),
                    page: *page,
                },
            ),
            Request::Trailers { category } => FetchPlan {
                independent: vec![FetchTask::new(
                    0,
                    TaskKind::Listing,
                    self.trailer_listing(*category),
                )],
                dependent: Some(DependentRule::VideosPerItem {
                    kind: category.media_kind(),
                    cap: TRAILER_ITEM_CAP,
                }),
            },
            Request::Popular { kind, page } => Self::single(
                TaskKind::Listing,
                CatalogEndpoint::Discover {
                    kind: *kind,
                    page: *page,
                    region: match kind {
                        MediaKind::Movie => Some(self.region.clone()),
                        MediaKind::Tv => None,
                    },
                },
            ),
            Request::Trending { window } => Self::single(
                TaskKind::Listing,
                CatalogEndpoint::TrendingMovies { window: *window },
            ),
            Request::TrendingPeople => {
                Self::single(TaskKind::Listing, CatalogEndpoint::TrendingPeople)
            }
            Request::Hero => Self::single(
                TaskKind::Listing,
                CatalogEndpoint::TrendingMovies {
                    window: TimeWindow::Week,
                },
            ),
        }
    }

    /// Tasks for work that depends on parent items. Ids carry straight from
    /// the parents; numbering continues after `first_id`.
    pub fn plan_dependents(
        &self,
        rule: &DependentRule,
        parents: &[u64],
        first_id: usize,
    ) -> Vec<FetchTask> {
        match rule {
            DependentRule::VideosPerItem { kind, cap } => parents
                .iter()
                .take(*cap)
                .enumerate()
                .map(|(offset, &parent)| {
                    FetchTask::new(
                        first_id + offset,
                        TaskKind::ItemVideos { parent },
                        CatalogEndpoint::Videos {
                            kind: *kind,
                            id: parent,
                        },
                    )
                })
                .collect(),
        }
    }

    fn trailer_listing(&self, category: EntityKind) -> CatalogEndpoint {
        match category {
            EntityKind::Movie => CatalogEndpoint::NowPlaying {
                page: 1,
                region: Some(self.region.clone()),
            },
            EntityKind::Tv => CatalogEndpoint::AiringToday { page: 1 },
            EntityKind::Upcoming => CatalogEndpoint::Upcoming { page: 1 },
        }
    }

    fn single(kind: TaskKind, endpoint: CatalogEndpoint) -> FetchPlan {
        FetchPlan {
            independent: vec![FetchTask::new(0, kind, endpoint)],
            dependent: None,
        }
    }
}
