//! Page-number pagination.
//!
//! Out-of-range page numbers never fail: anything below 1 or unparsable
//! resolves to the first page, anything past the end to the last page.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A single page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Current page number (1-indexed).
    pub number: usize,
    pub num_pages: usize,
    pub total_count: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<usize> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<usize> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            total_count: self.total_count,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// A zero page size falls back to the default.
    pub fn new(page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self { page_size }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` items. An empty collection has one page.
    pub fn num_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Resolve a raw `page` query parameter to a valid page number.
    pub fn resolve(&self, page_param: Option<&str>, total: usize) -> usize {
        let requested = page_param
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1);
        let last = self.num_pages(total) as i64;
        requested.clamp(1, last) as usize
    }

    pub fn get_page<T>(&self, items: Vec<T>, page_param: Option<&str>) -> Page<T> {
        let total_count = items.len();
        let number = self.resolve(page_param, total_count);
        let start = (number - 1) * self.page_size;

        let items = items
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect();

        Page {
            items,
            number,
            num_pages: self.num_pages(total_count),
            total_count,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_by_default() {
        let page = Paginator::new(10).get_page((1..=25).collect(), None);
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 3);
        assert_eq!(page.items, (1..=10).collect::<Vec<_>>());
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_overflow_clamps_to_last_page() {
        let page = Paginator::new(10).get_page((1..=25).collect(), Some("4"));
        assert_eq!(page.number, 3);
        assert_eq!(page.items, (21..=25).collect::<Vec<_>>());
        assert_eq!(page.next_page_number(), None);
        assert_eq!(page.previous_page_number(), Some(2));
    }

    #[test]
    fn test_underflow_and_garbage_resolve_to_first_page() {
        let paginator = Paginator::new(10);
        assert_eq!(paginator.resolve(Some("0"), 25), 1);
        assert_eq!(paginator.resolve(Some("-3"), 25), 1);
        assert_eq!(paginator.resolve(Some("two"), 25), 1);
        assert_eq!(paginator.resolve(Some(""), 25), 1);
    }

    #[test]
    fn test_empty_collection_has_one_empty_page() {
        let page: Page<u32> = Paginator::new(10).get_page(Vec::new(), Some("5"));
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_zero_page_size_uses_default() {
        assert_eq!(Paginator::new(0).page_size(), DEFAULT_PAGE_SIZE);
    }
}
