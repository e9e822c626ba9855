//! Pagination windows over filtered result sets.

use serde::Serialize;

/// Errors that can occur when building a [`PageRequest`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PageRequestError {
    /// Pages are numbered from 1.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one row.
    #[error("pageSize must be at least 1")]
    ZeroPageSize,
}

/// A `(page, page_size)` window into a result set.
///
/// Pages are 1-based. There is no upper bound on either value; a page past
/// the end of the result set is simply empty.
///
/// ```
/// use contact_book_core::PageRequest;
///
/// let window = PageRequest::new(2, 10).unwrap();
/// assert_eq!(window.offset(), 10);
/// assert_eq!(window.limit(), 10);
/// assert_eq!(window.expected_len(15), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Page used when the client does not ask for one.
    pub const DEFAULT_PAGE: u32 = 1;
    /// Page size used when the client does not ask for one.
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Create a window, rejecting zero values.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` or `page_size` is zero.
    pub const fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        Ok(Self { page, page_size })
    }

    /// Build a window from optional query values, applying the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a provided value is zero.
    pub fn from_query(page: Option<u32>, page_size: Option<u32>) -> Result<Self, PageRequestError> {
        Self::new(
            page.unwrap_or(Self::DEFAULT_PAGE),
            page_size.unwrap_or(Self::DEFAULT_PAGE_SIZE),
        )
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Rows per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows to skip: `(page - 1) * page_size`.
    ///
    /// Saturates at `i64::MAX`, which is past the end of any real table.
    #[must_use]
    pub fn offset(&self) -> i64 {
        let rows = u64::from(self.page - 1) * u64::from(self.page_size);
        i64::try_from(rows).unwrap_or(i64::MAX)
    }

    /// Maximum number of rows in the window.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    /// Rows this window holds for a result set of `total_count` rows:
    /// `min(page_size, total_count - offset)`, never negative.
    #[must_use]
    pub fn expected_len(&self, total_count: i64) -> i64 {
        total_count
            .saturating_sub(self.offset())
            .clamp(0, self.limit())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of rows together with the size of the full result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Rows matching the filter, ignoring the window.
    pub total_count: i64,
    /// Rows inside the window.
    pub rows: Vec<T>,
}

impl<T> Page<T> {
    /// An empty page for a result set of `total_count` rows.
    #[must_use]
    pub const fn empty(total_count: i64) -> Self {
        Self {
            total_count,
            rows: Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let window = PageRequest::from_query(None, None).unwrap();
        assert_eq!(window, PageRequest::default());
        assert_eq!(window.page(), 1);
        assert_eq!(window.page_size(), 10);
        assert_eq!(window.offset(), 0);
    }

    #[test]
    fn test_rejects_zero() {
        assert_eq!(PageRequest::new(0, 10), Err(PageRequestError::ZeroPage));
        assert_eq!(PageRequest::new(1, 0), Err(PageRequestError::ZeroPageSize));
        assert_eq!(
            PageRequest::from_query(Some(0), None),
            Err(PageRequestError::ZeroPage)
        );
    }

    #[test]
    fn test_second_page_of_fifteen() {
        let window = PageRequest::new(2, 10).unwrap();
        assert_eq!(window.offset(), 10);
        assert_eq!(window.expected_len(15), 5);
    }

    #[test]
    fn test_full_and_past_end_pages() {
        let window = PageRequest::new(1, 10).unwrap();
        assert_eq!(window.expected_len(15), 10);

        let past_end = PageRequest::new(3, 10).unwrap();
        assert_eq!(past_end.expected_len(15), 0);
        assert_eq!(past_end.expected_len(0), 0);
    }

    #[test]
    fn test_offset_saturates() {
        let window = PageRequest::new(u32::MAX, u32::MAX).unwrap();
        assert_eq!(window.offset(), i64::MAX);
        assert_eq!(window.expected_len(1_000), 0);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = Page {
            total_count: 2,
            rows: vec!["a", "b"],
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json, serde_json::json!({"totalCount": 2, "rows": ["a", "b"]}));
        assert_eq!(
            serde_json::to_value(Page::<u8>::empty(15)).unwrap(),
            serde_json::json!({"totalCount": 15, "rows": []})
        );
    }
}
