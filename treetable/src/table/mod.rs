//! Tree table controller.
//!
//! [`TreeTable`] owns the sort state, the page window and the notification
//! channels of one table. It drives the sort engine and the serializer and
//! hands the flattened rows to the presentation shell.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use treetable::prelude::*;
//!
//! let config = TreeTableConfig::new().paginator(PaginatorConfig::default(), 2);
//! let mut table = TreeTable::with_config(config).unwrap();
//! table.init();
//!
//! table.set_value(
//!     (0..5)
//!         .map(|i| TreeNode::new(json!({ "id": i })))
//!         .collect::<Vec<_>>(),
//! );
//! assert_eq!(table.total_records(), 5);
//! assert_eq!(table.rows().len(), 2);
//!
//! table.change_page(4, 2);
//! assert_eq!(table.rows().len(), 1);
//! ```

mod state;

pub use state::{TableId, TreeTable};
