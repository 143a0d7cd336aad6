//! Page-number forwarding for catalog list endpoints
//!
//! The catalog owns the page size; callers only forward a page number and read
//! back the totals it reports.
use serde::{Deserialize, Serialize};

/// Paginated result wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, page: u32, total_pages: u32, total_results: u32) -> Self {
        Self {
            items,
            page,
            total_pages,
            total_results,
        }
    }

    /// A page outside `1..=total_pages` is never requested.
    pub fn can_go_to(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U, F>(self, f: F) -> PaginatedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_go_to_respects_bounds() {
        let result = PaginatedResult::new(vec![1, 2, 3], 1, 5, 100);
        assert!(!result.can_go_to(0));
        assert!(result.can_go_to(1));
        assert!(result.can_go_to(5));
        assert!(!result.can_go_to(6));
    }
}
