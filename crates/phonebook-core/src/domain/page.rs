//! Pagination envelope types.
//!
//! Pages are zero-based. Page sizes are normalized once, when the request is
//! built, so the stores never see an out-of-range size.

use serde::{Deserialize, Serialize};

/// Page size used when the caller asks for something unusable.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A normalized page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Build a request using the built-in size limits.
    pub fn new(page: i64, size: i64) -> Self {
        Self::with_limits(page, size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }

    /// Build a request with explicit limits.
    ///
    /// A size `<= 0` or above `max_size` falls back to `default_size`.
    /// A negative page becomes page 0.
    pub fn with_limits(page: i64, size: i64, default_size: u32, max_size: u32) -> Self {
        let size = u32::try_from(size)
            .ok()
            .filter(|s| (1..=max_size).contains(s))
            .unwrap_or(default_size);
        let page = u32::try_from(page.max(0)).unwrap_or(u32::MAX);
        Self { page, size }
    }

    /// First page with the default size.
    pub const fn first() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Row offset of the first element of this page.
    pub const fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of results plus the totals needed for pagination controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Assemble a page from the rows of `request` and the total match count.
    pub fn new(items: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size());
        Self {
            items,
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages: total_elements.div_ceil(size),
        }
    }

    /// A page with no rows.
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    pub const fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.page) + 1 >= self.total_pages
    }

    /// Transform the rows while keeping the totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_falls_back_to_default() {
        assert_eq!(PageRequest::new(0, 0).size(), DEFAULT_PAGE_SIZE);
        assert_eq!(PageRequest::new(0, -5).size(), DEFAULT_PAGE_SIZE);
        assert_eq!(PageRequest::new(0, 500).size(), DEFAULT_PAGE_SIZE);
        assert_eq!(PageRequest::new(0, 100).size(), 100);
        assert_eq!(PageRequest::new(0, 1).size(), 1);
    }

    #[test]
    fn test_negative_page_is_first_page() {
        let req = PageRequest::new(-3, 20);
        assert_eq!(req.page(), 0);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(2, 20).offset(), 40);
    }

    #[test]
    fn test_total_pages() {
        let page: Page<u8> = Page::new(vec![0; 20], PageRequest::new(0, 20), 45);
        assert_eq!(page.total_pages, 3);
        assert!(page.is_first());
        assert!(!page.is_last());

        let empty: Page<u8> = Page::empty(PageRequest::first());
        assert_eq!(empty.total_pages, 0);
        assert!(empty.is_last());
    }

    #[test]
    fn test_custom_limits() {
        let req = PageRequest::with_limits(0, 60, 10, 50);
        assert_eq!(req.size(), 10);
    }

    #[test]
    fn test_map_keeps_totals() {
        let page = Page::new(vec![1, 2], PageRequest::new(1, 2), 5).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
    }
}
