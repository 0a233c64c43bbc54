//! Forest sort engine.

use std::fmt;

use log::trace;

use crate::node::NodeList;
use crate::value::RowData;

use super::compare::{compare_chain, compare_fields};
use super::{SortMeta, SortMode, SortOrder, SortState};

/// A sort request handed to an external sort handler.
///
/// The handler is expected to reorder `data` in place (e.g. with
/// [`NodeList::sort_by`]); the engine performs no comparison of its own.
#[derive(Debug, Clone)]
pub struct CustomSortEvent<D> {
    /// The nodes to reorder.
    pub data: NodeList<D>,
    /// Active sort mode.
    pub mode: SortMode,
    /// Field and order (single mode) or the descriptor chain (multiple mode).
    pub sort: SortState,
}

impl<D> CustomSortEvent<D> {
    /// Sort field, in single mode.
    pub fn field(&self) -> Option<&str> {
        match &self.sort {
            SortState::Single(meta) => Some(&meta.field),
            SortState::Multiple(_) => None,
        }
    }

    /// Sort order, in single mode.
    pub fn order(&self) -> Option<SortOrder> {
        match &self.sort {
            SortState::Single(meta) => Some(meta.order),
            SortState::Multiple(_) => None,
        }
    }

    /// Descriptor chain, in multiple mode.
    pub fn multi_sort_meta(&self) -> Option<&[SortMeta]> {
        match &self.sort {
            SortState::Single(_) => None,
            SortState::Multiple(metas) => Some(metas),
        }
    }
}

/// Who performs the comparison: the engine, or an external handler.
pub enum SortStrategy<'a, D> {
    /// The engine sorts locally with the built-in comparator.
    Local,
    /// The engine hands each request to the handler and mutates nothing.
    Custom(&'a dyn Fn(CustomSortEvent<D>)),
}

impl<D> fmt::Debug for SortStrategy<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortStrategy::Local => f.write_str("Local"),
            SortStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Sort a forest according to `sort`.
///
/// Single mode sorts every level independently with the same field and
/// order. Multiple mode sorts every level with the descriptor chain.
///
/// With [`SortStrategy::Custom`], single mode delegates each level (top
/// level first, then children depth-first); multiple mode delegates the top
/// level once and does not descend. An empty forest is a no-op.
pub fn sort_forest<D: RowData>(
    nodes: &NodeList<D>,
    sort: &SortState,
    strategy: &SortStrategy<'_, D>,
) {
    match sort {
        SortState::Single(meta) => sort_single(nodes, meta, strategy),
        SortState::Multiple(metas) => sort_multiple(nodes, metas, strategy),
    }
}

fn sort_single<D: RowData>(nodes: &NodeList<D>, meta: &SortMeta, strategy: &SortStrategy<'_, D>) {
    if nodes.is_empty() {
        return;
    }

    match strategy {
        SortStrategy::Custom(handler) => handler(CustomSortEvent {
            data: nodes.clone(),
            mode: SortMode::Single,
            sort: SortState::Single(meta.clone()),
        }),
        SortStrategy::Local => {
            trace!("sorting {} nodes by '{}'", nodes.len(), meta.field);
            nodes.sort_by(|a, b| meta.order.apply(compare_fields(a, b, &meta.field)));
        }
    }

    for node in nodes.to_vec() {
        sort_single(&node.children(), meta, strategy);
    }
}

fn sort_multiple<D: RowData>(
    nodes: &NodeList<D>,
    metas: &[SortMeta],
    strategy: &SortStrategy<'_, D>,
) {
    if nodes.is_empty() {
        return;
    }

    match strategy {
        SortStrategy::Custom(handler) => handler(CustomSortEvent {
            data: nodes.clone(),
            mode: SortMode::Multiple,
            sort: SortState::Multiple(metas.to_vec()),
        }),
        SortStrategy::Local => sort_chain_recursive(nodes, metas),
    }
}

fn sort_chain_recursive<D: RowData>(nodes: &NodeList<D>, metas: &[SortMeta]) {
    if nodes.is_empty() {
        return;
    }
    trace!("sorting {} nodes by {} keys", nodes.len(), metas.len());
    nodes.sort_by(|a, b| compare_chain(a, b, metas, 0));
    for node in nodes.to_vec() {
        sort_chain_recursive(&node.children(), metas);
    }
}
