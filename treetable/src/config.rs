//! Table configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pagination::PaginatorConfig;
use crate::shell::ScrollHeight;
use crate::sort::{SortMeta, SortMode, SortOrder};

/// Settings for one [`TreeTable`](crate::table::TreeTable).
///
/// Built in code with the builder methods, or loaded from JSON with
/// [`TreeTableConfig::from_json`]. Missing keys take their defaults.
///
/// # Example
///
/// ```
/// use treetable::config::TreeTableConfig;
/// use treetable::pagination::PaginatorConfig;
/// use treetable::sort::SortMode;
///
/// let config = TreeTableConfig::new()
///     .paginator(PaginatorConfig::default(), 10)
///     .sort_mode(SortMode::Multiple);
/// assert!(config.validate().is_ok());
///
/// let loaded = TreeTableConfig::from_json(r#"{"lazy": true, "rows": 25}"#).unwrap();
/// assert!(loaded.lazy);
/// assert_eq!(loaded.rows, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeTableConfig {
    /// Delegate loading and sorting to the caller.
    pub lazy: bool,

    /// Paginator settings; `None` disables pagination.
    pub paginator: Option<PaginatorConfig>,

    /// Page size.
    pub rows: usize,

    /// Initial page offset.
    pub first: usize,

    /// Initial total record count (lazy callers).
    pub total_records: usize,

    /// Order applied when a field is first sorted.
    pub default_sort_order: SortOrder,

    /// Single or multiple sort.
    pub sort_mode: SortMode,

    /// Initial single-mode sort field.
    pub sort_field: Option<String>,

    /// Initial single-mode sort order.
    pub sort_order: SortOrder,

    /// Initial multi-mode descriptor chain.
    pub multi_sort_meta: Option<Vec<SortMeta>>,

    /// Jump back to the first page after a single-mode sort.
    pub reset_page_on_sort: bool,

    /// Emit sort requests to the caller instead of sorting locally.
    pub custom_sort: bool,

    /// Show the loading overlay.
    pub loading: bool,

    /// Render with scrollable regions.
    pub scrollable: bool,

    /// Scrollable body height, e.g. `"400px"` or `"60%"`.
    pub scroll_height: Option<String>,

    /// Width of the frozen column region, e.g. `"200px"`.
    pub frozen_width: Option<String>,
}

impl Default for TreeTableConfig {
    fn default() -> Self {
        Self {
            lazy: false,
            paginator: None,
            rows: 0,
            first: 0,
            total_records: 0,
            default_sort_order: SortOrder::Ascending,
            sort_mode: SortMode::Single,
            sort_field: None,
            sort_order: SortOrder::Ascending,
            multi_sort_meta: None,
            reset_page_on_sort: true,
            custom_sort: false,
            loading: false,
            scrollable: false,
            scroll_height: None,
            frozen_width: None,
        }
    }
}

impl TreeTableConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings for contradictions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paginator.is_some() && self.rows == 0 {
            return Err(ConfigError::PaginatorWithoutRows);
        }
        if let Some(height) = &self.scroll_height {
            ScrollHeight::parse(height)?;
        }
        Ok(())
    }

    /// Enable lazy mode.
    pub fn lazy(mut self) -> Self {
        self.lazy = true;
        self
    }

    /// Enable pagination with a page size.
    pub fn paginator(mut self, paginator: PaginatorConfig, rows: usize) -> Self {
        self.paginator = Some(paginator);
        self.rows = rows;
        self
    }

    /// Set the initial page offset.
    pub fn first(mut self, first: usize) -> Self {
        self.first = first;
        self
    }

    /// Set the sort mode.
    pub fn sort_mode(mut self, mode: SortMode) -> Self {
        self.sort_mode = mode;
        self
    }

    /// Set the order used when a field is first sorted.
    pub fn default_sort_order(mut self, order: SortOrder) -> Self {
        self.default_sort_order = order;
        self
    }

    /// Set the initial single-mode sort.
    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = order;
        self
    }

    /// Set the initial multi-mode descriptor chain.
    pub fn multi_sort_meta(mut self, metas: Vec<SortMeta>) -> Self {
        self.multi_sort_meta = Some(metas);
        self
    }

    /// Keep the current page after sorting.
    pub fn keep_page_on_sort(mut self) -> Self {
        self.reset_page_on_sort = false;
        self
    }

    /// Delegate sorting to the caller.
    pub fn custom_sort(mut self) -> Self {
        self.custom_sort = true;
        self
    }

    /// Enable scrollable regions with a body height.
    pub fn scrollable(mut self, scroll_height: impl Into<String>) -> Self {
        self.scrollable = true;
        self.scroll_height = Some(scroll_height.into());
        self
    }

    /// Set the frozen region width.
    pub fn frozen_width(mut self, width: impl Into<String>) -> Self {
        self.frozen_width = Some(width.into());
        self
    }
}
