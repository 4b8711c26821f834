//! Page request and page metadata for listing endpoints.
//!
//! Pages are 1-based. A [`PageParams`] is always normalized on construction,
//! so repositories can bind [`PageParams::limit`] and [`PageParams::offset`]
//! without further checks.

use serde::Serialize;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Upper bound on a single page.
pub const MAX_PAGE_SIZE: i64 = 500;

/// A normalized page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    page: i64,
    size: i64,
}

impl PageParams {
    /// Build a page request from optional user input.
    ///
    /// `page` is floored at 1 and `size` is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            size: size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// The 1-based page number.
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Rows per page, i.e. the SQL `LIMIT`.
    pub fn limit(&self) -> i64 {
        self.size
    }

    /// Rows to skip, i.e. the SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }

    /// Describe where this page sits within `total` rows.
    pub fn page_of_total(&self, total: i64) -> Page {
        let total = total.max(0);
        Page {
            number: self.page,
            size: self.size,
            total_elements: total,
            total_pages: (total + self.size - 1) / self.size,
        }
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Position of a page within the whole result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
