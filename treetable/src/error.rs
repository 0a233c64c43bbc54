//! Error types.
//!
//! Table operations never fail; degenerate input is a no-op. Errors only
//! arise when parsing settings: a configuration, a sort order or a template
//! slot name.

use thiserror::Error;

/// Errors raised while validating or loading a [`TreeTableConfig`](crate::config::TreeTableConfig)
/// or one of the settings it is made of.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Pagination is enabled but no page size was given.
    #[error("Paginator enabled without a page size (rows must be > 0)")]
    PaginatorWithoutRows,

    /// A scroll height that is neither pixels nor a percentage.
    #[error("Invalid scroll height '{value}': expected '<n>px', '<n>' or '<n>%'")]
    InvalidScrollHeight {
        /// The rejected input.
        value: String,
    },

    /// A sort order other than `1` or `-1`.
    #[error("Invalid sort order {0}: expected 1 or -1")]
    InvalidSortOrder(i8),

    /// A template slot name that is not known.
    #[error("Unknown template slot '{name}'")]
    UnknownTemplateSlot {
        /// The rejected name.
        name: String,
    },

    /// The configuration document could not be parsed.
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates an invalid scroll height error.
    pub fn invalid_scroll_height(value: impl Into<String>) -> Self {
        Self::InvalidScrollHeight {
            value: value.into(),
        }
    }

    /// Creates an unknown template slot error.
    pub fn unknown_template_slot(name: impl Into<String>) -> Self {
        Self::UnknownTemplateSlot { name: name.into() }
    }
}
