//! Pagination primitives shared by every listing.

use serde::{Deserialize, Serialize};

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub const DEFAULT_PER_PAGE: u64 = 5;
    pub const MAX_PER_PAGE: u64 = 100;
    /// Keeps the row offset within a signed 64-bit `OFFSET`.
    pub const MAX_PAGE: u64 = i64::MAX as u64 / Self::MAX_PER_PAGE;

    /// Build a request, clamping `page` to `1..=MAX_PAGE` and `per_page` to `1..=MAX_PER_PAGE`.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.clamp(1, Self::MAX_PAGE),
            per_page: per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }

    /// Zero-based page index.
    pub fn index(&self) -> u64 {
        self.page.max(1) - 1
    }

    pub fn offset(&self) -> u64 {
        self.index().saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PER_PAGE)
    }
}

/// One page of results plus the total number of matching items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.per_page.max(1))
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_normalization() {
        let req = PageRequest::new(0, 0);
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, 1);
        assert_eq!(PageRequest::new(3, 500).per_page, PageRequest::MAX_PER_PAGE);
        assert_eq!(PageRequest::new(3, 5).offset(), 10);
    }

    #[test]
    fn test_huge_page_number_is_bounded() {
        let req = PageRequest::new(u64::MAX, 5);
        assert_eq!(req.page, PageRequest::MAX_PAGE);
        assert!(req.offset() <= i64::MAX as u64);

        let raw = PageRequest {
            page: u64::MAX,
            per_page: u64::MAX,
        };
        assert_eq!(raw.offset(), u64::MAX);
    }

    #[test]
    fn test_page_navigation() {
        let page = Page::new(vec![1, 2, 3, 4, 5], PageRequest::new(1, 5), 7);
        assert_eq!(page.total_pages(), 2);
        assert!(page.has_next());
        assert!(!page.has_previous());

        let empty: Page<i32> = Page::new(vec![], PageRequest::default(), 0);
        assert_eq!(empty.total_pages(), 0);
        assert!(!empty.has_next());
    }
}
