//! Clamping paginator for list views.
//!
//! Every listing surface shows [`crate::PAGE_SIZE`] items per page, selected
//! with a 1-based `page` query parameter. Out-of-range values clamp to the
//! nearest valid page: anything below 1 (or unparseable) becomes page 1,
//! anything past the end becomes the last page. An empty listing still has
//! one (empty) page.

use serde::Serialize;

/// One page of a listing, plus what the templates need to draw the
/// pagination controls.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, already clamped.
    pub number: i64,
    /// Total items across all pages.
    pub total: i64,
    /// Total pages; at least 1.
    pub pages: i64,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.pages
    }
}

/// Clamp a requested page number against a total item count.
///
/// Returns the effective page number and the query offset for it.
pub fn clamp(requested: Option<i64>, total: i64, page_size: i64) -> (i64, i64) {
    let pages = page_count(total, page_size);
    let number = requested.unwrap_or(1).clamp(1, pages);
    (number, (number - 1) * page_size)
}

/// Total pages for `total` items; at least 1.
pub fn page_count(total: i64, page_size: i64) -> i64 {
    ((total + page_size - 1) / page_size).max(1)
}

/// Assemble a [`Page`] from an already-clamped page number and the fetched
/// slice of items.
pub fn paginate<T>(items: Vec<T>, number: i64, total: i64, page_size: i64) -> Page<T> {
    Page {
        items,
        number,
        total,
        pages: page_count(total, page_size),
    }
}
