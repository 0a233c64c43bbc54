//! Flattening of the forest into row views.

use crate::node::{NodeList, TreeNode};
use crate::pagination::PaginationState;

/// One flattened row: a node plus where and whether it appears.
#[derive(Debug, Clone)]
pub struct RowView<D> {
    /// The node itself.
    pub node: TreeNode<D>,
    /// Parent node (None at the top level).
    pub parent: Option<TreeNode<D>>,
    /// Depth in tree (0 = top level).
    pub level: usize,
    /// False when any ancestor is collapsed.
    pub visible: bool,
}

impl<D> PartialEq for RowView<D> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
            && self.parent == other.parent
            && self.level == other.level
            && self.visible == other.visible
    }
}

/// Flatten a forest into row views.
///
/// Without pagination every node is walked depth-first. With pagination only
/// the top-level nodes in `[first, first + rows)` are walked; in lazy mode the
/// forest already is the page, so the offset is taken as 0.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treetable::node::{NodeList, TreeNode};
/// use treetable::serialize::serialize;
///
/// let forest = NodeList::from_vec(vec![
///     TreeNode::new(json!({"name": "src"}))
///         .with_children(vec![TreeNode::new(json!({"name": "lib.rs"}))]),
/// ]);
/// let rows = serialize(&forest, None, false);
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].level, 1);
/// assert!(!rows[1].visible); // "src" is collapsed
/// ```
pub fn serialize<D>(
    forest: &NodeList<D>,
    pagination: Option<&PaginationState>,
    lazy: bool,
) -> Vec<RowView<D>> {
    match pagination {
        Some(page) => serialize_page(forest, page.first, page.rows, lazy),
        None => serialize_nodes(forest),
    }
}

/// Flatten the whole forest depth-first.
pub fn serialize_nodes<D>(forest: &NodeList<D>) -> Vec<RowView<D>> {
    let mut out = Vec::new();
    collect(None, forest, 0, true, &mut out);
    out
}

/// Flatten only the top-level nodes of one page, each with its subtree.
///
/// Page roots are always visible; their descendants follow the usual
/// expanded-ancestor rule.
pub fn serialize_page<D>(
    forest: &NodeList<D>,
    first: usize,
    rows: usize,
    lazy: bool,
) -> Vec<RowView<D>> {
    let mut out = Vec::new();
    let first = if lazy { 0 } else { first };
    for node in forest.to_vec().into_iter().skip(first).take(rows) {
        let children = node.children();
        out.push(RowView {
            node: node.clone(),
            parent: None,
            level: 0,
            visible: true,
        });
        collect(Some(&node), &children, 1, true, &mut out);
    }
    out
}

fn collect<D>(
    parent: Option<&TreeNode<D>>,
    nodes: &NodeList<D>,
    level: usize,
    visible: bool,
    out: &mut Vec<RowView<D>>,
) {
    let parent_expanded = parent.map(TreeNode::is_expanded).unwrap_or(true);
    for node in nodes.to_vec() {
        let row_visible = visible && parent_expanded;
        let children = node.children();
        out.push(RowView {
            node: node.clone(),
            parent: parent.cloned(),
            level,
            visible: row_visible,
        });
        collect(Some(&node), &children, level + 1, row_visible, out);
    }
}
