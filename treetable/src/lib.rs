//! Hierarchical table engine.
//!
//! Flattens a forest of [`TreeNode`](node::TreeNode)s into visibility-aware,
//! paginated rows and keeps them in step with sorting and expand/collapse.
//! Rendering is left to the caller; the [`shell`] module
//! holds the state a renderer needs around the rows.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use treetable::prelude::*;
//!
//! let mut table = TreeTable::new();
//! table.init();
//!
//! let src = TreeNode::new(json!({"name": "src"}))
//!     .with_children(vec![TreeNode::new(json!({"name": "main.rs"}))]);
//! table.set_value(vec![src.clone()]);
//! assert_eq!(table.visible_rows().count(), 1);
//!
//! table.toggle_node(&src);
//! assert_eq!(table.visible_rows().count(), 2);
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod node;
pub mod pagination;
pub mod serialize;
pub mod service;
pub mod shell;
pub mod sort;
pub mod table;
pub mod value;

pub mod prelude {
    pub use crate::config::TreeTableConfig;
    pub use crate::error::ConfigError;
    pub use crate::events::{EventChannel, LazyLoadEvent, PageEvent, TableEvent};
    pub use crate::node::{NodeList, TreeNode};
    pub use crate::pagination::{PaginationState, PaginatorConfig, PaginatorPosition};
    pub use crate::serialize::RowView;
    pub use crate::service::{Channel, Subscription, TableService};
    pub use crate::shell::{ScrollableView, SortIcon, SortableColumn, Templates, Toggler};
    pub use crate::sort::{CustomSortEvent, SortMeta, SortMode, SortOrder, SortState};
    pub use crate::table::{TableId, TreeTable};
    pub use crate::value::{FieldValue, RowData};
}
