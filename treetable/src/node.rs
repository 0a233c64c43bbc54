//! Shared tree node handles.
//!
//! `TreeNode` and `NodeList` are cheap-to-clone handles onto shared state.
//! The caller builds the forest and keeps its handles; the table holds clones
//! of the same handles, so reordering a `NodeList` or toggling a node is seen
//! by everyone holding it. Node data is never copied by the table.

use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::value::{FieldValue, RowData};

/// Internal state of a tree node.
#[derive(Debug)]
struct NodeInner<D> {
    /// Application data.
    data: D,
    /// Ordered children (empty for leaves).
    children: NodeList<D>,
    /// Whether children are shown.
    expanded: bool,
    /// Explicit leaf flag, independent of whether children are loaded yet.
    leaf: Option<bool>,
}

/// A node in the forest.
///
/// Cloning a `TreeNode` clones the handle, not the node. Equality is identity.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treetable::node::TreeNode;
///
/// let docs = TreeNode::new(json!({"name": "docs"}))
///     .with_children(vec![TreeNode::new(json!({"name": "readme.md"}))]);
/// let handle = docs.clone();
/// handle.set_expanded(true);
/// assert!(docs.is_expanded());
/// assert_eq!(docs.children().len(), 1);
/// ```
pub struct TreeNode<D> {
    inner: Arc<RwLock<NodeInner<D>>>,
}

impl<D> TreeNode<D> {
    /// Create a collapsed node with no children.
    pub fn new(data: D) -> Self {
        Self {
            inner: Arc::new(RwLock::new(NodeInner {
                data,
                children: NodeList::new(),
                expanded: false,
                leaf: None,
            })),
        }
    }

    /// Set the children (builder style).
    pub fn with_children(self, children: Vec<TreeNode<D>>) -> Self {
        self.set_children(children);
        self
    }

    /// Set the expanded flag (builder style).
    pub fn expanded(self, expanded: bool) -> Self {
        self.set_expanded(expanded);
        self
    }

    /// Set the explicit leaf flag (builder style).
    pub fn leaf(self, leaf: bool) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.leaf = Some(leaf);
        }
        self
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Run a closure against the node's data.
    ///
    /// Returns `None` only if the node's lock is poisoned.
    pub fn with_data<R>(&self, f: impl FnOnce(&D) -> R) -> Option<R> {
        self.inner.read().ok().map(|g| f(&g.data))
    }

    /// Replace the node's data.
    pub fn set_data(&self, data: D) {
        if let Ok(mut guard) = self.inner.write() {
            guard.data = data;
        }
    }

    /// Get a copy of the node's data.
    pub fn data(&self) -> Option<D>
    where
        D: Clone,
    {
        self.with_data(D::clone)
    }

    /// Resolve a field path against the node's data.
    pub fn resolve_field(&self, path: &str) -> Option<FieldValue>
    where
        D: RowData,
    {
        self.with_data(|d| d.resolve_field(path)).flatten()
    }

    // -------------------------------------------------------------------------
    // Children
    // -------------------------------------------------------------------------

    /// Get the children handle.
    pub fn children(&self) -> NodeList<D> {
        self.inner
            .read()
            .map(|g| g.children.clone())
            .unwrap_or_default()
    }

    /// Replace the children (e.g. after a lazy subtree load).
    pub fn set_children(&self, children: Vec<TreeNode<D>>) {
        if let Ok(guard) = self.inner.read() {
            guard.children.replace(children);
        }
    }

    /// Whether the node currently has any children.
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    // -------------------------------------------------------------------------
    // Flags
    // -------------------------------------------------------------------------

    /// Whether the node is expanded.
    pub fn is_expanded(&self) -> bool {
        self.inner.read().map(|g| g.expanded).unwrap_or(false)
    }

    /// Set the expanded flag.
    pub fn set_expanded(&self, expanded: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.expanded = expanded;
        }
    }

    /// Flip the expanded flag, returning the new state.
    pub fn toggle(&self) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            guard.expanded = !guard.expanded;
            return guard.expanded;
        }
        false
    }

    /// The explicit leaf flag, if one was declared.
    pub fn leaf_flag(&self) -> Option<bool> {
        self.inner.read().ok().and_then(|g| g.leaf)
    }

    /// Set or clear the explicit leaf flag.
    pub fn set_leaf(&self, leaf: Option<bool>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.leaf = leaf;
        }
    }

    /// Whether two handles point at the same node.
    pub fn ptr_eq(&self, other: &TreeNode<D>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<D> Clone for TreeNode<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D> PartialEq for TreeNode<D> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<D> Eq for TreeNode<D> {}

impl<D: fmt::Debug> fmt::Debug for TreeNode<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.read() {
            Ok(g) => f
                .debug_struct("TreeNode")
                .field("data", &g.data)
                .field("expanded", &g.expanded)
                .field("leaf", &g.leaf)
                .field("children", &g.children.len())
                .finish(),
            Err(_) => f.write_str("TreeNode(<poisoned>)"),
        }
    }
}

// =============================================================================
// NodeList
// =============================================================================

/// A shared, ordered sequence of nodes.
///
/// The forest root and every node's children are `NodeList`s. Sorting
/// reorders the list in place, visible through every clone of the handle.
pub struct NodeList<D> {
    inner: Arc<RwLock<Vec<TreeNode<D>>>>,
}

impl<D> NodeList<D> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a list from nodes.
    pub fn from_vec(nodes: Vec<TreeNode<D>>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(nodes)),
        }
    }

    /// Number of nodes in this list (not counting descendants).
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.len()).unwrap_or(0)
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a node handle by index.
    pub fn get(&self, index: usize) -> Option<TreeNode<D>> {
        self.inner.read().ok().and_then(|g| g.get(index).cloned())
    }

    /// Snapshot of the node handles in current order.
    pub fn to_vec(&self) -> Vec<TreeNode<D>> {
        self.inner.read().map(|g| g.clone()).unwrap_or_default()
    }

    /// Append a node.
    pub fn push(&self, node: TreeNode<D>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.push(node);
        }
    }

    /// Replace the contents, keeping the handle identity.
    pub fn replace(&self, nodes: Vec<TreeNode<D>>) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = nodes;
        }
    }

    /// Stable-sort the list in place.
    pub fn sort_by<F>(&self, compare: F)
    where
        F: FnMut(&TreeNode<D>, &TreeNode<D>) -> Ordering,
    {
        if let Ok(mut guard) = self.inner.write() {
            guard.sort_by(compare);
        }
    }

    /// Position of a node in this list, by identity.
    pub fn position(&self, node: &TreeNode<D>) -> Option<usize> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.iter().position(|n| n.ptr_eq(node)))
    }

    /// Whether two handles point at the same list.
    pub fn ptr_eq(&self, other: &NodeList<D>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<D> Clone for NodeList<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D> Default for NodeList<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> From<Vec<TreeNode<D>>> for NodeList<D> {
    fn from(nodes: Vec<TreeNode<D>>) -> Self {
        Self::from_vec(nodes)
    }
}

impl<D: fmt::Debug> fmt::Debug for NodeList<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}
