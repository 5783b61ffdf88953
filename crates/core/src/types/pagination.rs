//! Page metadata returned by every paginated admin endpoint.

use serde::{Deserialize, Serialize};

/// Server-reported pagination for a list response.
///
/// Always replaced wholesale from the most recent response; never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of records matching the query.
    pub total: u64,
    /// Current page (1-indexed).
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total number of pages.
    pub pages: u32,
}

impl Pagination {
    /// Page size used when the caller does not choose one.
    pub const DEFAULT_LIMIT: u32 = 20;

    /// Pagination for an unpaginated response holding `len` records.
    #[must_use]
    pub fn single_page(len: usize) -> Self {
        let total = len as u64;
        let limit = u32::try_from(len).unwrap_or(u32::MAX);
        Self {
            total,
            page: 1,
            limit,
            pages: u32::from(len > 0),
        }
    }

    /// Whether a page before the current one exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a page after the current one exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.pages
    }

    /// Whether the pager should be shown at all.
    #[must_use]
    pub const fn is_multi_page(&self) -> bool {
        self.pages > 1
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            limit: Self::DEFAULT_LIMIT,
            pages: 0,
        }
    }
}

impl std::fmt::Display for Pagination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Page {} of {} ({} total)", self.page, self.pages, self.total)
    }
}
