pub mod fetch_task;
pub mod media_item;
pub mod request;
pub mod upstream_result;
pub mod views;

pub use fetch_task::{FetchTask, TaskId, TaskKind, TaskRole, TaskState};
pub use media_item::{MediaItem, MovieSummary, PersonSummary, TvSummary};
pub use request::Request;
pub use upstream_result::{TaskOutcome, UpstreamResult, UpstreamResults};
pub use views::{
    CardListView, CastCard, DetailView, HeroCarousel, HeroSlide, HeroView, MediaCard,
    ResolvedTrailer, TrailerCard, TrailerListView,
};
