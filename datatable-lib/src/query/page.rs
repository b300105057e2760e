//! Pagination stage and page-number helpers.

use std::fmt;

use serde::Serialize;

/// Current page and page size. Both are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    /// 1-based page number.
    pub current_page: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl PageState {
    /// Creates a page state on page 1. A zero page size is raised to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }
}

/// Number of pages needed for `len` rows. Never less than 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Clamps a possibly out-of-range page number into `[1, total_pages]`.
pub fn clamp_page(page: i64, total_pages: usize) -> usize {
    if page < 1 {
        return 1;
    }
    usize::try_from(page).map_or(total_pages, |p| p.min(total_pages))
}

/// One page of a sequence, along with its position in the whole.
///
/// # Example
///
/// ```
/// use datatable_lib::query::paginate;
///
/// let items: Vec<u32> = (1..=10).collect();
/// let page = paginate(&items, 4, 3);
///
/// assert_eq!(page.total_pages, 4);
/// assert_eq!(page.rows, &[10]);
/// assert_eq!((page.start_index, page.end_index), (9, 10));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// Items on this page.
    pub rows: &'a [T],
    /// The page actually shown, after clamping.
    pub page: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Zero-based index of the first item on this page.
    pub start_index: usize,
    /// Zero-based index one past the last item on this page.
    pub end_index: usize,
}

/// Slices page `page` of `rows`.
///
/// A page past the end is clamped to the last page and page 0 is treated
/// as page 1, so the result is always a valid (possibly empty) slice.
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(rows.len(), page_size);
    let page = page.clamp(1, total_pages);
    let start_index = ((page - 1) * page_size).min(rows.len());
    let end_index = (start_index + page_size).min(rows.len());

    Page {
        rows: &rows[start_index..end_index],
        page,
        total_pages,
        start_index,
        end_index,
    }
}

/// An entry in a page-number control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageItem {
    /// A clickable page number.
    Page(usize),
    /// A gap between page numbers.
    Ellipsis,
}

/// Page numbers to show in a pagination control.
///
/// When every page fits in `max_visible` slots they are all listed.
/// Otherwise a window of `max_visible` pages is centred on `current`,
/// and the first and last pages are always kept, separated from the
/// window by an ellipsis when pages are skipped.
///
/// # Example
///
/// ```
/// use datatable_lib::query::{visible_pages, PageItem::{Ellipsis, Page}};
///
/// assert_eq!(
///     visible_pages(10, 20, 7),
///     vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10),
///          Page(11), Page(12), Page(13), Ellipsis, Page(20)],
/// );
/// ```
pub fn visible_pages(current: usize, total: usize, max_visible: usize) -> Vec<PageItem> {
    let max_visible = max_visible.max(1);
    if total <= max_visible {
        return (1..=total).map(PageItem::Page).collect();
    }

    let half = max_visible / 2;
    let mut start = current.saturating_sub(half).max(1);
    let end = (start + max_visible - 1).min(total);
    if end - start + 1 < max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }

    let mut pages = Vec::with_capacity(max_visible + 4);
    if start > 1 {
        pages.push(PageItem::Page(1));
        if start > 2 {
            pages.push(PageItem::Ellipsis);
        }
    }
    pages.extend((start..=end).map(PageItem::Page));
    if end < total {
        if end < total - 1 {
            pages.push(PageItem::Ellipsis);
        }
        pages.push(PageItem::Page(total));
    }
    pages
}

/// Range of results shown on the current page, 1-based for display.
///
/// Displays as `Showing {first} to {last} of {total} results`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    /// Position of the first row on the page (0 when empty).
    pub first: usize,
    /// Position of the last row on the page (0 when empty).
    pub last: usize,
    /// Number of rows across all pages.
    pub total: usize,
}

impl PageSummary {
    /// Builds the summary from a page's zero-based bounds.
    pub fn new(start_index: usize, end_index: usize, total: usize) -> Self {
        if start_index >= end_index {
            return Self {
                first: 0,
                last: 0,
                total,
            };
        }
        Self {
            first: start_index + 1,
            last: end_index,
            total,
        }
    }
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} to {} of {} results",
            self.first, self.last, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Ellipsis, Page};
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(10, 3), 4);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(-3, 5), 1);
        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(3, 5), 3);
        assert_eq!(clamp_page(99, 5), 5);
        assert_eq!(clamp_page(i64::MAX, 5), 5);
    }

    #[test]
    fn test_paginate_clamps_past_end() {
        let items: Vec<u32> = (0..5).collect();
        let page = paginate(&items, 9, 2);
        assert_eq!(page.page, 3);
        assert_eq!(page.rows, &[4]);
    }

    #[test]
    fn test_paginate_empty() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 1, 10);
        assert_eq!(page.total_pages, 1);
        assert!(page.rows.is_empty());
        assert_eq!((page.start_index, page.end_index), (0, 0));
    }

    #[test]
    fn test_visible_pages_all_fit() {
        assert_eq!(visible_pages(1, 3, 7), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(visible_pages(1, 1, 7), vec![Page(1)]);
    }

    #[test]
    fn test_visible_pages_at_start() {
        assert_eq!(
            visible_pages(1, 10, 7),
            vec![
                Page(1),
                Page(2),
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10)
            ]
        );
    }

    #[test]
    fn test_visible_pages_at_end() {
        assert_eq!(
            visible_pages(10, 10, 7),
            vec![
                Page(1),
                Ellipsis,
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Page(8),
                Page(9),
                Page(10)
            ]
        );
    }

    #[test]
    fn test_visible_pages_no_ellipsis_for_adjacent() {
        // Window 2..=8 of 9: page 1 and 9 are adjacent to it
        assert_eq!(
            visible_pages(5, 9, 7),
            vec![
                Page(1),
                Page(2),
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Page(8),
                Page(9)
            ]
        );
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            PageSummary::new(10, 20, 45).to_string(),
            "Showing 11 to 20 of 45 results"
        );
        assert_eq!(
            PageSummary::new(0, 0, 0).to_string(),
            "Showing 0 to 0 of 0 results"
        );
    }
}
