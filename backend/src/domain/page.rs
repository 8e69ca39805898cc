//! Offset-based paging primitives shared by list queries.

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 6;
/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Window into an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    limit: u32,
    offset: u32,
}

impl PageRequest {
    /// Build a window, clamping `limit` into `1..=MAX_PAGE_SIZE`.
    ///
    /// # Examples
    /// ```
    /// use recipe_book::domain::{MAX_PAGE_SIZE, PageRequest};
    ///
    /// let page = PageRequest::new(Some(500), None);
    /// assert_eq!(page.limit(), MAX_PAGE_SIZE);
    /// assert_eq!(page.offset(), 0);
    /// ```
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            offset: offset.unwrap_or(0),
        }
    }

    /// Maximum number of items to return.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip.
    pub fn offset(&self) -> u32 {
        self.offset
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the size of the full result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    /// An empty page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Transform every item while keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::defaults(None, None, DEFAULT_PAGE_SIZE, 0)]
    #[case::zero_limit(Some(0), Some(4), 1, 4)]
    #[case::explicit(Some(12), Some(24), 12, 24)]
    #[case::oversized(Some(1_000), None, MAX_PAGE_SIZE, 0)]
    fn page_request_clamps_limit(
        #[case] limit: Option<u32>,
        #[case] offset: Option<u32>,
        #[case] expected_limit: u32,
        #[case] expected_offset: u32,
    ) {
        let page = PageRequest::new(limit, offset);
        assert_eq!(page.limit(), expected_limit);
        assert_eq!(page.offset(), expected_offset);
    }

    #[rstest]
    fn map_keeps_total() {
        let page = Page {
            items: vec![1, 2, 3],
            total: 9,
        };
        let mapped = page.map(|value| value * 10);
        assert_eq!(mapped.items, vec![10, 20, 30]);
        assert_eq!(mapped.total, 9);
    }
}
