//! Scrollable view geometry.
//!
//! This module provides:
//! - `ScrollHeight`: Parsed body height setting
//! - `ScrollMetrics`: Measured sizes supplied by the renderer
//! - `ScrollableView`: Scroll offsets and margins for one frozen or unfrozen region

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::trace;

use crate::error::ConfigError;
use crate::service::Subscription;
use crate::table::TreeTable;
use crate::value::RowData;

// =============================================================================
// ScrollHeight
// =============================================================================

/// Height of a scrollable body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollHeight {
    /// Fixed height in pixels.
    Pixels(f64),
    /// Percentage of the table's parent height.
    Percent(f64),
}

impl ScrollHeight {
    /// Parse `"<n>px"`, `"<n>"` or `"<n>%"`.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let trimmed = input.trim();
        let (number, percent) = match trimmed.strip_suffix('%') {
            Some(number) => (number, true),
            None => (trimmed.strip_suffix("px").unwrap_or(trimmed), false),
        };

        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid_scroll_height(input))?;
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::invalid_scroll_height(input));
        }

        Ok(if percent {
            ScrollHeight::Percent(value)
        } else {
            ScrollHeight::Pixels(value)
        })
    }

    /// Maximum body height in pixels.
    ///
    /// A percentage is taken of the parent height, minus the static parts
    /// of the table (headers, footers, paginators). Frozen bodies also give
    /// up room for the horizontal scrollbar of their unfrozen sibling.
    pub fn body_max_height(&self, metrics: &ScrollMetrics, frozen: bool) -> f64 {
        let height = match self {
            ScrollHeight::Pixels(px) => *px,
            ScrollHeight::Percent(pct) => {
                metrics.parent_height * pct / 100.0 - metrics.static_height
            }
        };
        if frozen {
            height - metrics.scrollbar_width
        } else {
            height
        }
    }
}

impl std::str::FromStr for ScrollHeight {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// ScrollMetrics
// =============================================================================

/// Sizes measured by the renderer after layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Width of a vertical scrollbar.
    pub scrollbar_width: f64,
    /// Height of the table's parent.
    pub parent_height: f64,
    /// Height of everything in the table except the scrollable body.
    pub static_height: f64,
    /// Height of the body's content.
    pub content_height: f64,
    /// Visible height of the body.
    pub body_height: f64,
}

impl ScrollMetrics {
    /// Whether the body content overflows vertically.
    pub fn has_vertical_overflow(&self) -> bool {
        self.content_height > self.body_height
    }
}

// =============================================================================
// ScrollableView
// =============================================================================

/// Scroll state of one scrollable region.
///
/// A table with frozen columns has two views side by side: the frozen one on
/// the left and the unfrozen one on the right. Only the unfrozen body scrolls
/// on its own; the header and footer boxes follow it horizontally and the
/// frozen body follows it vertically.
///
/// Scrollbar alignment waits for layout: a value change on the table marks it
/// pending and the next [`tick`](Self::tick) applies it.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treetable::prelude::*;
/// use treetable::shell::{ScrollMetrics, ScrollableView};
///
/// let config = TreeTableConfig::new().scrollable("300px");
/// let mut table: TreeTable<serde_json::Value> = TreeTable::with_config(config).unwrap();
/// let mut view = ScrollableView::new(&table, false);
///
/// view.on_body_scroll(40.0, 0.0);
/// assert_eq!(view.header_margin_left(), -40.0);
///
/// table.set_value(vec![TreeNode::new(json!({}))]);
/// let metrics = ScrollMetrics {
///     scrollbar_width: 15.0,
///     content_height: 500.0,
///     body_height: 200.0,
///     ..Default::default()
/// };
/// view.update_scroll_height(&metrics);
/// assert_eq!(view.body_max_height(), Some(300.0));
/// assert!(view.tick(&metrics));
/// assert_eq!(view.header_margin_right(), 15.0);
/// ```
#[derive(Debug)]
pub struct ScrollableView {
    frozen: bool,
    scroll_height: Option<ScrollHeight>,
    frozen_width: Option<String>,
    has_header: bool,
    has_footer: bool,
    has_frozen_sibling: bool,
    header_margin_left: f64,
    footer_margin_left: f64,
    header_margin_right: f64,
    footer_margin_right: f64,
    header_scroll_left: f64,
    footer_scroll_left: f64,
    frozen_sibling_scroll_top: f64,
    body_max_height: Option<f64>,
    pending_align: Arc<AtomicBool>,
    _subscription: Subscription,
}

impl ScrollableView {
    /// Create a view for `table` and listen to its value changes.
    ///
    /// The body height and the frozen region width are taken from the table.
    pub fn new<D: RowData + 'static>(table: &TreeTable<D>, frozen: bool) -> Self {
        let pending_align = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&pending_align);
        let subscription = table.service().value.subscribe(move |_| {
            flag.store(true, Ordering::SeqCst);
        });

        Self {
            frozen,
            scroll_height: table.scroll_height(),
            frozen_width: table.frozen_width().map(str::to_string),
            has_header: true,
            has_footer: false,
            has_frozen_sibling: false,
            header_margin_left: 0.0,
            footer_margin_left: 0.0,
            header_margin_right: 0.0,
            footer_margin_right: 0.0,
            header_scroll_left: 0.0,
            footer_scroll_left: 0.0,
            frozen_sibling_scroll_top: 0.0,
            body_max_height: None,
            pending_align,
            _subscription: subscription,
        }
    }

    /// Set whether the view renders a header box.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set whether the view renders a footer box.
    pub fn with_footer(mut self, has_footer: bool) -> Self {
        self.has_footer = has_footer;
        self
    }

    /// Link an unfrozen view to the frozen view on its left.
    pub fn with_frozen_sibling(mut self) -> Self {
        self.has_frozen_sibling = !self.frozen;
        self
    }

    /// Whether this is the frozen region.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    // -------------------------------------------------------------------------
    // Scroll events
    // -------------------------------------------------------------------------

    /// The body scrolled. Frozen bodies never scroll on their own.
    pub fn on_body_scroll(&mut self, scroll_left: f64, scroll_top: f64) {
        if self.frozen {
            return;
        }
        if self.has_header {
            self.header_margin_left = -scroll_left;
        }
        if self.has_footer {
            self.footer_margin_left = -scroll_left;
        }
        if self.has_frozen_sibling {
            self.frozen_sibling_scroll_top = scroll_top;
        }
    }

    /// The header scrolled by itself; it is pinned back.
    pub fn on_header_scroll(&mut self, _scroll_left: f64) {
        self.header_scroll_left = 0.0;
    }

    /// The footer scrolled by itself; it is pinned back.
    pub fn on_footer_scroll(&mut self, _scroll_left: f64) {
        self.footer_scroll_left = 0.0;
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    /// Compute the body's maximum height from the table's scroll height.
    /// Without one the body grows with its content.
    pub fn update_scroll_height(&mut self, metrics: &ScrollMetrics) {
        self.body_max_height = self
            .scroll_height
            .map(|height| height.body_max_height(metrics, self.frozen));
    }

    /// Reserve room for the body's vertical scrollbar in the header and
    /// footer boxes. Frozen views have no vertical scrollbar.
    pub fn align_scroll_bar(&mut self, metrics: &ScrollMetrics) {
        if self.frozen {
            return;
        }
        let width = if metrics.has_vertical_overflow() {
            metrics.scrollbar_width
        } else {
            0.0
        };
        self.header_margin_right = width;
        if self.has_footer {
            self.footer_margin_right = width;
        }
    }

    /// Apply a pending scrollbar alignment. Returns whether one ran.
    pub fn tick(&mut self, metrics: &ScrollMetrics) -> bool {
        if !self.pending_align.swap(false, Ordering::SeqCst) {
            return false;
        }
        trace!("aligning scrollbar (frozen={})", self.frozen);
        self.align_scroll_bar(metrics);
        true
    }

    /// Whether an alignment is waiting for the next tick.
    pub fn is_align_pending(&self) -> bool {
        self.pending_align.load(Ordering::SeqCst)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Left margin of the header box.
    pub fn header_margin_left(&self) -> f64 {
        self.header_margin_left
    }

    /// Left margin of the footer box.
    pub fn footer_margin_left(&self) -> f64 {
        self.footer_margin_left
    }

    /// Right margin of the header box.
    pub fn header_margin_right(&self) -> f64 {
        self.header_margin_right
    }

    /// Right margin of the footer box.
    pub fn footer_margin_right(&self) -> f64 {
        self.footer_margin_right
    }

    /// Horizontal scroll offset of the header.
    pub fn header_scroll_left(&self) -> f64 {
        self.header_scroll_left
    }

    /// Horizontal scroll offset of the footer.
    pub fn footer_scroll_left(&self) -> f64 {
        self.footer_scroll_left
    }

    /// Vertical offset the frozen sibling body must follow.
    pub fn frozen_sibling_scroll_top(&self) -> f64 {
        self.frozen_sibling_scroll_top
    }

    /// The table's scroll height.
    pub fn scroll_height(&self) -> Option<ScrollHeight> {
        self.scroll_height
    }

    /// Width of this region: the frozen width for the frozen view, the rest
    /// of the table for the unfrozen one. `None` without a frozen region.
    pub fn width(&self) -> Option<String> {
        let frozen_width = self.frozen_width.as_deref()?;
        Some(if self.frozen {
            frozen_width.to_string()
        } else {
            unfrozen_width(frozen_width)
        })
    }

    /// Left offset of this region. The unfrozen view starts where the
    /// frozen one ends.
    pub fn left(&self) -> Option<&str> {
        if self.frozen {
            None
        } else {
            self.frozen_width.as_deref()
        }
    }

    /// Maximum body height, once computed.
    pub fn body_max_height(&self) -> Option<f64> {
        self.body_max_height
    }

    /// Bottom padding of the body. Frozen bodies pad for the scrollbar row
    /// of their unfrozen sibling.
    pub fn body_padding_bottom(&self, metrics: &ScrollMetrics) -> f64 {
        if self.frozen {
            metrics.scrollbar_width
        } else {
            0.0
        }
    }
}

fn unfrozen_width(frozen_width: &str) -> String {
    format!("calc(100% - {frozen_width})")
}
