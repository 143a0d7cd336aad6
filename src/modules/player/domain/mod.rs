pub mod modal;
pub mod youtube;

pub use modal::{TrailerModalData, MISSING_KEY_MESSAGE};
