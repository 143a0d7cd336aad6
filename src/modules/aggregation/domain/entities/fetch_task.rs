use crate::modules::catalog::CatalogEndpoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a task inside one request's plan. Results are keyed by it,
/// never by arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub usize);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskRole {
    /// Failure fails the whole aggregation
    Primary,
    /// Failure degrades to an empty default
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Details,
    Credits,
    Videos,
    /// The listing a list view is built from
    Listing,
    /// Similar titles for one entity
    Similar,
    /// Videos of one listing item, issued once the listing is known
    ItemVideos { parent: u64 },
}

impl TaskKind {
    pub fn role(&self) -> TaskRole {
        match self {
            TaskKind::Details | TaskKind::Listing => TaskRole::Primary,
            TaskKind::Credits
            | TaskKind::Videos
            | TaskKind::Similar
            | TaskKind::ItemVideos { .. } => TaskRole::Secondary,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Details => "details",
            TaskKind::Credits => "credits",
            TaskKind::Videos => "videos",
            TaskKind::Listing => "listing",
            TaskKind::Similar => "similar",
            TaskKind::ItemVideos { .. } => "item-videos",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    Pending,
    Done,
    Failed,
}

/// One upstream call planned for a request
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTask {
    pub id: TaskId,
    pub kind: TaskKind,
    pub endpoint: CatalogEndpoint,
    pub state: TaskState,
}

impl FetchTask {
    pub fn new(id: usize, kind: TaskKind, endpoint: CatalogEndpoint) -> Self {
        Self {
            id: TaskId(id),
            kind,
            endpoint,
            state: TaskState::Pending,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.kind.role() == TaskRole::Primary
    }

    /// `"details #0 (/movie/550)"`, for logs
    pub fn describe(&self) -> String {
        format!("{} {} ({})", self.kind.label(), self.id, self.endpoint.path())
    }
}
