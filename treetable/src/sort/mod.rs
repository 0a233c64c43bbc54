//! Sort descriptors, comparison and the forest sort engine.

mod compare;
mod engine;

pub use compare::{compare_chain, compare_fields, compare_values, natural_cmp};
pub use engine::{CustomSortEvent, SortStrategy, sort_forest};

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Sort direction.
///
/// Serialized as `1` (ascending) and `-1` (descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Ascending,
    /// Descending order (Z-A, 9-0).
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }

    /// Signed representation: `1` or `-1`.
    pub fn as_i8(self) -> i8 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

impl From<SortOrder> for i8 {
    fn from(order: SortOrder) -> Self {
        order.as_i8()
    }
}

impl TryFrom<i8> for SortOrder {
    type Error = ConfigError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SortOrder::Ascending),
            -1 => Ok(SortOrder::Descending),
            other => Err(ConfigError::InvalidSortOrder(other)),
        }
    }
}

/// Whether one field or a chain of fields drives sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// One active field.
    #[default]
    Single,
    /// An ordered chain of fields; the first is the primary key.
    Multiple,
}

/// A field and its sort direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortMeta {
    /// Field path into node data.
    pub field: String,
    /// Sort direction.
    pub order: SortOrder,
}

impl SortMeta {
    /// Create a descriptor.
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    /// Ascending descriptor.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Ascending)
    }

    /// Descending descriptor.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Descending)
    }
}

/// The sort state broadcast to sort indicators after every completed sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortState {
    /// Single-field sort.
    Single(SortMeta),
    /// Multi-field sort chain.
    Multiple(Vec<SortMeta>),
}

impl SortState {
    /// Whether `field` takes part in this sort.
    pub fn is_sorted(&self, field: &str) -> bool {
        self.sort_meta(field).is_some()
    }

    /// The descriptor for `field`, if it takes part in this sort.
    pub fn sort_meta(&self, field: &str) -> Option<&SortMeta> {
        match self {
            SortState::Single(meta) => (meta.field == field).then_some(meta),
            SortState::Multiple(metas) => metas.iter().find(|m| m.field == field),
        }
    }

    /// Signed order for `field`: `1`, `-1`, or `0` when unsorted.
    pub fn order_for(&self, field: &str) -> i8 {
        self.sort_meta(field).map(|m| m.order.as_i8()).unwrap_or(0)
    }
}
