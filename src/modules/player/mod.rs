pub mod application;
pub mod domain;

pub use application::{TrailerHandle, TrailerPlayer};
pub use domain::TrailerModalData;
