pub mod pagination;

pub use pagination::PaginatedResult;
