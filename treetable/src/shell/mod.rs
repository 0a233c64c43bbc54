//! Presentation shell contract.
//!
//! The pieces a renderer needs around the flattened rows: template slots,
//! sort indicators, row togglers and scroll synchronization. None of them
//! draw anything; they hold the state a renderer reads.

mod scroll;
mod sort_indicator;
mod templates;
mod toggler;

pub use scroll::{ScrollHeight, ScrollMetrics, ScrollableView};
pub use sort_indicator::{SortIcon, SortableColumn};
pub use templates::{TemplateKind, Templates};
pub use toggler::{INDENT_PER_LEVEL, Toggler};
