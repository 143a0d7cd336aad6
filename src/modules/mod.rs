pub mod aggregation;
pub mod catalog;
pub mod genre;
pub mod player;
