pub mod genre_store;

pub use genre_store::GenreStore;
