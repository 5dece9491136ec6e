//! Page arithmetic for paged results
//!
//! `Paginable` derives everything a page-navigation widget needs from three
//! numbers: total hits, page size and current page. `iter_pages` produces
//! the list of page numbers to render, with `None` marking elided gaps.

use hitview_core::PaginationConfig;

/// Pagination over a result set of `total()` items
///
/// Implementors supply `total`, `page_size` and `current_page`; everything
/// else is derived.
pub trait Paginable {
    /// Total number of items across all pages
    fn total(&self) -> u64;

    /// Items per page
    fn page_size(&self) -> u32;

    /// 1-based current page
    fn current_page(&self) -> u32;

    /// Number of pages (0 when there are no items or the page size is 0)
    fn pages(&self) -> u32 {
        let size = u64::from(self.page_size());
        if size == 0 {
            return 0;
        }
        let total = self.total();
        let pages = total / size + u64::from(total % size != 0);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// True if a previous page exists
    fn has_prev(&self) -> bool {
        self.current_page() > 1
    }

    /// True if a following page exists
    fn has_next(&self) -> bool {
        self.current_page() < self.pages()
    }

    /// Previous page number
    fn prev_page(&self) -> Option<u32> {
        if self.has_prev() {
            Some(self.current_page() - 1)
        } else {
            None
        }
    }

    /// Next page number
    fn next_page(&self) -> Option<u32> {
        if self.has_next() {
            Some(self.current_page() + 1)
        } else {
            None
        }
    }

    /// 1-based position of the first item on this page (0 when empty)
    fn page_start(&self) -> u64 {
        if self.total() == 0 {
            return 0;
        }
        let skipped = u64::from(self.current_page().saturating_sub(1)) * u64::from(self.page_size());
        (skipped + 1).min(self.total())
    }

    /// 1-based position of the last item on this page
    fn page_end(&self) -> u64 {
        let end = u64::from(self.page_size()) * u64::from(self.current_page());
        end.min(self.total())
    }

    /// Page numbers to display, `None` marking a gap
    ///
    /// The first `left_edge` and last `right_edge` pages are always listed,
    /// plus the pages from `current - left_current` up to (excluding)
    /// `current + right_current`.
    fn iter_pages(&self, config: &PaginationConfig) -> Vec<Option<u32>> {
        page_window(self.pages(), self.current_page(), config)
    }
}

/// Compute the displayed page list for `pages` pages around `current`
pub fn page_window(pages: u32, current: u32, config: &PaginationConfig) -> Vec<Option<u32>> {
    let pages = u64::from(pages);
    let current = u64::from(current);

    let mut spans: Vec<(u64, u64)> = vec![
        (1, u64::from(config.left_edge)),
        (
            current.saturating_sub(u64::from(config.left_current)),
            (current + u64::from(config.right_current)).saturating_sub(1),
        ),
        (pages.saturating_sub(u64::from(config.right_edge)) + 1, pages),
    ];
    for span in spans.iter_mut() {
        span.0 = span.0.max(1);
        span.1 = span.1.min(pages);
    }
    spans.retain(|(lo, hi)| lo <= hi);
    spans.sort_unstable();

    let mut merged: Vec<(u64, u64)> = Vec::with_capacity(spans.len());
    for (lo, hi) in spans {
        match merged.last_mut() {
            Some(last) if lo <= last.1 + 1 => last.1 = last.1.max(hi),
            _ => merged.push((lo, hi)),
        }
    }

    let mut out = Vec::new();
    let mut last = 0u64;
    for (lo, hi) in merged {
        if last + 1 != lo {
            out.push(None);
        }
        // Spans are clamped to `pages`, which fits in u32
        out.extend((lo..=hi).map(|n| Some(n as u32)));
        last = hi;
    }
    out
}
