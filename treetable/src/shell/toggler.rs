//! Expand/collapse toggler for a row.

use crate::serialize::RowView;
use crate::table::TreeTable;
use crate::value::RowData;

/// Indentation per tree level, in pixels.
pub const INDENT_PER_LEVEL: usize = 16;

/// How the toggler of one row is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggler {
    /// The toggler occupies space in the row.
    pub rendered: bool,
    /// The toggler icon is shown (a rendered toggler may be a blank spacer).
    pub visible: bool,
    /// The node is expanded.
    pub expanded: bool,
    /// Left indentation in pixels.
    pub indent: usize,
}

impl Toggler {
    /// Display rules for `row`.
    ///
    /// Nested rows always reserve the toggler space so siblings line up.
    /// The icon is shown for nodes that have children or are declared
    /// non-leaf (children not loaded yet).
    pub fn for_row<D>(row: &RowView<D>) -> Self {
        let declared_branch = row.node.leaf_flag() == Some(false);
        let has_children = row.node.has_children();

        Self {
            rendered: declared_branch || row.level != 0 || has_children,
            visible: declared_branch || has_children,
            expanded: row.node.is_expanded(),
            indent: row.level * INDENT_PER_LEVEL,
        }
    }

    /// Icon for the current state.
    pub fn icon(&self) -> &'static str {
        match (self.visible, self.expanded) {
            (false, _) => " ",
            (true, true) => "▼",
            (true, false) => "▶",
        }
    }

    /// Toggle `row`'s node on `table`.
    pub fn click<D: RowData + 'static>(table: &mut TreeTable<D>, row: &RowView<D>) {
        table.toggle_node(&row.node);
    }
}
