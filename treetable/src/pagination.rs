//! Pagination state and paginator layout.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Current page window over the top-level nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    /// 0-based offset of the first top-level node on the page.
    pub first: usize,
    /// Page size.
    pub rows: usize,
    /// Total top-level records (local count, or caller-supplied in lazy mode).
    pub total_records: usize,
}

impl PaginationState {
    /// Create a pagination state.
    pub fn new(first: usize, rows: usize, total_records: usize) -> Self {
        Self {
            first,
            rows,
            total_records,
        }
    }

    /// Number of pages (at least 1, so an empty table still has a page).
    pub fn page_count(&self) -> usize {
        if self.rows == 0 {
            return 1;
        }
        self.total_records.div_ceil(self.rows).max(1)
    }

    /// 0-based index of the current page.
    pub fn current_page(&self) -> usize {
        if self.rows == 0 {
            return 0;
        }
        self.first / self.rows
    }

    /// Whether the current page is the first.
    pub fn is_first_page(&self) -> bool {
        self.current_page() == 0
    }

    /// Whether the current page is the last.
    pub fn is_last_page(&self) -> bool {
        self.current_page() + 1 >= self.page_count()
    }

    /// Offset of the first record on `page` (0-based).
    pub fn first_of_page(&self, page: usize) -> usize {
        page.min(self.page_count() - 1) * self.rows
    }

    /// Indices of the top-level records on the current page.
    pub fn record_range(&self) -> Range<usize> {
        let end = (self.first + self.rows).min(self.total_records);
        self.first.min(end)..end
    }

    /// Page links to show: a window of at most `links` pages around the
    /// current page, shifted to stay within bounds.
    pub fn page_link_range(&self, links: usize) -> Range<usize> {
        let count = self.page_count();
        let visible = links.min(count);
        let current = self.current_page();
        let start = current.saturating_sub(visible / 2);
        let start = start.min(count - visible);
        start..start + visible
    }
}

/// Where the paginator is shown relative to the table body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginatorPosition {
    /// Above the body.
    Top,
    /// Below the body.
    #[default]
    Bottom,
    /// Above and below the body.
    Both,
}

/// Paginator widget settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginatorConfig {
    /// Page sizes offered to the user.
    pub rows_per_page_options: Vec<usize>,
    /// Placement.
    pub position: PaginatorPosition,
    /// Show even when everything fits on one page.
    pub always_show: bool,
    /// Number of page links to display.
    pub page_links: usize,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            rows_per_page_options: Vec::new(),
            position: PaginatorPosition::Bottom,
            always_show: true,
            page_links: 5,
        }
    }
}

impl PaginatorConfig {
    /// Set the placement.
    pub fn position(mut self, position: PaginatorPosition) -> Self {
        self.position = position;
        self
    }

    /// Set the offered page sizes.
    pub fn rows_per_page_options(mut self, options: Vec<usize>) -> Self {
        self.rows_per_page_options = options;
        self
    }

    /// Hide the paginator when there is only one page.
    pub fn hide_single_page(mut self) -> Self {
        self.always_show = false;
        self
    }

    /// Set the number of page links.
    pub fn page_links(mut self, links: usize) -> Self {
        self.page_links = links;
        self
    }

    /// Whether a paginator renders at `slot` (Top or Bottom).
    pub fn shows_at(&self, slot: PaginatorPosition) -> bool {
        self.position == PaginatorPosition::Both || self.position == slot
    }

    /// Whether the paginator renders at all for `state`.
    pub fn is_visible(&self, state: &PaginationState) -> bool {
        self.always_show || state.page_count() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_math() {
        let state = PaginationState::new(20, 10, 45);
        assert_eq!(state.page_count(), 5);
        assert_eq!(state.current_page(), 2);
        assert_eq!(state.record_range(), 20..30);
        assert!(!state.is_last_page());
        assert_eq!(PaginationState::new(40, 10, 45).record_range(), 40..45);
    }

    #[test]
    fn empty_table_has_one_page() {
        let state = PaginationState::new(0, 10, 0);
        assert_eq!(state.page_count(), 1);
        assert!(state.is_first_page());
        assert!(state.is_last_page());
        assert_eq!(state.record_range(), 0..0);
    }

    #[test]
    fn page_links_stay_in_bounds() {
        let state = PaginationState::new(0, 10, 100);
        assert_eq!(state.page_link_range(5), 0..5);
        let state = PaginationState::new(50, 10, 100);
        assert_eq!(state.page_link_range(5), 3..8);
        let state = PaginationState::new(90, 10, 100);
        assert_eq!(state.page_link_range(5), 5..10);
        let state = PaginationState::new(0, 10, 20);
        assert_eq!(state.page_link_range(5), 0..2);
    }

    #[test]
    fn paginator_slots() {
        let config = PaginatorConfig::default().position(PaginatorPosition::Both);
        assert!(config.shows_at(PaginatorPosition::Top));
        assert!(config.shows_at(PaginatorPosition::Bottom));
        let config = PaginatorConfig::default().hide_single_page();
        assert!(!config.is_visible(&PaginationState::new(0, 10, 5)));
        assert!(config.is_visible(&PaginationState::new(0, 10, 15)));
    }
}
