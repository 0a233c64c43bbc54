//! Events the table emits to its caller.

use serde::{Deserialize, Serialize};

use crate::node::TreeNode;
use crate::service::Channel;
use crate::sort::{CustomSortEvent, SortMeta, SortOrder, SortState};

/// Page change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEvent {
    /// New page offset.
    pub first: usize,
    /// New page size.
    pub rows: usize,
}

/// What the caller must fetch in lazy mode.
///
/// Serializes with camelCase keys so it can be forwarded to a backend as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LazyLoadEvent {
    /// Page offset.
    pub first: usize,
    /// Page size.
    pub rows: usize,
    /// Single-mode sort field.
    pub sort_field: Option<String>,
    /// Single-mode sort order.
    pub sort_order: SortOrder,
    /// Multi-mode descriptor chain.
    pub multi_sort_meta: Option<Vec<SortMeta>>,
}

/// Output events of a [`TreeTable`](crate::table::TreeTable).
#[derive(Debug, Clone)]
pub enum TableEvent<D> {
    /// A node was expanded by a toggle.
    NodeExpand(TreeNode<D>),
    /// A node was collapsed by a toggle.
    NodeCollapse(TreeNode<D>),
    /// A sort completed (or was requested from the loader, in lazy mode).
    Sort(SortState),
    /// The page changed.
    Page(PageEvent),
    /// The caller must load data.
    LazyLoad(LazyLoadEvent),
    /// Custom sorting is enabled and this level must be sorted by the caller.
    SortFunction(CustomSortEvent<D>),
}

impl<D> TableEvent<D> {
    /// Short event name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            TableEvent::NodeExpand(_) => "node_expand",
            TableEvent::NodeCollapse(_) => "node_collapse",
            TableEvent::Sort(_) => "sort",
            TableEvent::Page(_) => "page",
            TableEvent::LazyLoad(_) => "lazy_load",
            TableEvent::SortFunction(_) => "sort_function",
        }
    }
}

/// Channel carrying a table's output events.
pub type EventChannel<D> = Channel<TableEvent<D>>;
