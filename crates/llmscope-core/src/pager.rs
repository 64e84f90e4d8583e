//! Fixed-size pagination over filtered collections

use serde::{Deserialize, Serialize};

use crate::models::{LogEntry, PageState};

/// Position of a page within its collection, for "Showing X to Y of Z"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// 1-based index of the first visible entry; zero, like `last`, when the page is empty
    pub first: usize,
    /// 1-based index of the last visible entry
    pub last: usize,
    /// Size of the whole collection
    pub total: usize,
    /// Number of pages in the collection
    pub total_pages: usize,
}

/// The entries on `page` (1-based); out-of-range pages are empty
///
/// Page zero is treated as the first page. A zero page size yields an empty
/// slice.
pub fn page(entries: &[LogEntry], page: usize, page_size: usize) -> &[LogEntry] {
    if page_size == 0 {
        return &[];
    }
    let start = offset(page, page_size).min(entries.len());
    let end = start.saturating_add(page_size).min(entries.len());
    &entries[start..end]
}

/// Entries on the page selected by `state`
pub fn current_page<'a>(entries: &'a [LogEntry], state: &PageState) -> &'a [LogEntry] {
    page(entries, state.page(), state.page_size())
}

/// `ceil(len / page_size)`; zero for an empty collection
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Display window for `state` over a collection of `len` entries
pub fn window(len: usize, state: &PageState) -> PageWindow {
    let start = offset(state.page(), state.page_size());
    let (first, last) = if start >= len {
        (0, 0)
    } else {
        (start + 1, start.saturating_add(state.page_size()).min(len))
    };
    PageWindow {
        first,
        last,
        total: len,
        total_pages: total_pages(len, state.page_size()),
    }
}

fn offset(page: usize, page_size: usize) -> usize {
    page.max(1).saturating_sub(1).saturating_mul(page_size)
}
