pub mod fetch_planner;
pub mod join_select;
pub mod projector;
pub mod selection;

pub use fetch_planner::{DependentRule, FetchPlan, FetchPlanner, HERO_SLIDE_CAP, TRAILER_ITEM_CAP};
pub use join_select::JoinSelect;
pub use projector::{ItemHint, MediaProjector};
pub use selection::{display_image, display_title, select_trailer};
