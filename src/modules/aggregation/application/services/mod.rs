pub mod detail;
pub mod hero;
pub mod listing;
pub mod trailers;

pub use detail::DetailAggregation;
pub use hero::HeroAggregation;
pub use listing::ListingAggregation;
pub use trailers::TrailersAggregation;
