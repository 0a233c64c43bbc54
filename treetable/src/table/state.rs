//! Tree table state.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, trace};

use crate::config::TreeTableConfig;
use crate::error::ConfigError;
use crate::events::{EventChannel, LazyLoadEvent, PageEvent, TableEvent};
use crate::node::{NodeList, TreeNode};
use crate::pagination::{PaginationState, PaginatorConfig};
use crate::serialize::{RowView, serialize_nodes, serialize_page};
use crate::service::{Channel, Subscription, TableService};
use crate::shell::ScrollHeight;
use crate::sort::{
    CustomSortEvent, SortMeta, SortMode, SortOrder, SortState, SortStrategy, sort_forest,
};
use crate::value::RowData;

/// Unique identifier for a TreeTable instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__treetable_{}", self.0)
    }
}

/// A hierarchical table: sort state, pagination and the flattened rows.
///
/// `TreeTable<D>` manages a forest of [`TreeNode`]s with:
/// - Single or multi-field sorting, done locally or by the caller
/// - Pagination over top-level nodes
/// - Expand/collapse with visibility propagation
/// - Output events and an internal notification service
///
/// Every operation runs to completion before returning. The row views are
/// rebuilt after data assignment, sorting, page changes and toggles.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treetable::prelude::*;
///
/// let mut table = TreeTable::new();
/// table.init();
/// table.set_value(vec![
///     TreeNode::new(json!({"name": "b"})),
///     TreeNode::new(json!({"name": "a"})),
/// ]);
/// table.request_sort("name", false);
///
/// let names: Vec<_> = table
///     .rows()
///     .iter()
///     .map(|row| row.node.resolve_field("name"))
///     .collect();
/// assert_eq!(names, vec![Some(FieldValue::from("a")), Some(FieldValue::from("b"))]);
/// ```
pub struct TreeTable<D> {
    /// Unique identifier.
    id: TableId,
    /// The forest (shared with the caller).
    value: NodeList<D>,
    /// Flattened rows from the last serialization pass.
    serialized: Vec<RowView<D>>,
    /// Delegate loading and sorting to the caller.
    lazy: bool,
    /// Paginator settings, if paginated.
    paginator: Option<PaginatorConfig>,
    /// Page window and record count.
    pagination: PaginationState,
    /// Sort mode.
    sort_mode: SortMode,
    /// Single-mode sort field.
    sort_field: Option<String>,
    /// Single-mode sort order.
    sort_order: SortOrder,
    /// Multi-mode descriptor chain.
    multi_sort_meta: Option<Vec<SortMeta>>,
    /// Order used when a field is first sorted.
    default_sort_order: SortOrder,
    /// Reset to the first page on single-mode sort.
    reset_page_on_sort: bool,
    /// Emit `SortFunction` instead of sorting locally.
    custom_sort: bool,
    /// Loading overlay flag.
    loading: bool,
    /// Render with scrollable regions.
    scrollable: bool,
    /// Scrollable body height.
    scroll_height: Option<ScrollHeight>,
    /// Width of the frozen column region.
    frozen_width: Option<String>,
    /// Set once `init` has run.
    initialized: bool,
    /// Internal notification topics.
    service: TableService<D>,
    /// Output events.
    events: EventChannel<D>,
    /// Dirty flag for re-render.
    dirty: bool,
}

impl<D: RowData + 'static> TreeTable<D> {
    /// Create an empty table with default settings.
    pub fn new() -> Self {
        Self::from_valid_config(TreeTableConfig::default())
    }

    /// Create a table from a configuration.
    pub fn with_config(config: TreeTableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TreeTableConfig) -> Self {
        Self {
            id: TableId::new(),
            value: NodeList::new(),
            serialized: Vec::new(),
            lazy: config.lazy,
            paginator: config.paginator,
            pagination: PaginationState::new(config.first, config.rows, config.total_records),
            sort_mode: config.sort_mode,
            sort_field: config.sort_field,
            sort_order: config.sort_order,
            multi_sort_meta: config.multi_sort_meta,
            default_sort_order: config.default_sort_order,
            reset_page_on_sort: config.reset_page_on_sort,
            custom_sort: config.custom_sort,
            loading: config.loading,
            scrollable: config.scrollable,
            scroll_height: config
                .scroll_height
                .as_deref()
                .and_then(|height| ScrollHeight::parse(height).ok()),
            frozen_width: config.frozen_width,
            initialized: false,
            service: TableService::new(),
            events: Channel::new(),
            dirty: false,
        }
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Finish initialization.
    ///
    /// In lazy mode this fires the initial load request. Sort setters called
    /// before `init` only store state in lazy mode, so the initial load is
    /// not raced by duplicate requests.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        if self.lazy {
            self.emit(TableEvent::LazyLoad(self.lazy_load_metadata()));
        }
        self.initialized = true;
    }

    /// Whether `init` has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Release every listener on the service and the output channel.
    pub fn destroy(&mut self) {
        debug!("{} destroyed", self.id);
        self.service.teardown();
        self.events.clear();
        self.initialized = false;
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// The forest handle.
    pub fn value(&self) -> NodeList<D> {
        self.value.clone()
    }

    /// Replace the forest.
    ///
    /// Outside lazy mode this recounts the records and applies the active
    /// sort. The rows are rebuilt either way.
    pub fn set_value(&mut self, value: impl Into<NodeList<D>>) {
        self.value = value.into();
        debug!("{} value set ({} top-level nodes)", self.id, self.value.len());

        if !self.lazy {
            self.update_total_records(self.value.len());

            match self.sort_mode {
                SortMode::Single if self.sort_field.is_some() => self.sort_single(),
                SortMode::Multiple if self.multi_sort_meta.is_some() => self.sort_multiple(),
                _ => {}
            }
        }

        self.update_serialized_value();
        self.service.on_value_change(&self.value);
    }

    /// Whether the forest is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Rows from the last serialization pass, including hidden ones.
    pub fn rows(&self) -> &[RowView<D>] {
        &self.serialized
    }

    /// Rows that should be rendered.
    pub fn visible_rows(&self) -> impl Iterator<Item = &RowView<D>> {
        self.serialized.iter().filter(|row| row.visible)
    }

    /// Rebuild the row views from the forest.
    ///
    /// Called by every operation that changes what is shown. Callers that
    /// mutate nodes directly must call it themselves.
    pub fn update_serialized_value(&mut self) {
        self.serialized = if self.paginator.is_some() {
            serialize_page(
                &self.value,
                self.pagination.first,
                self.pagination.rows,
                self.lazy,
            )
        } else {
            serialize_nodes(&self.value)
        };
        trace!("{} serialized {} rows", self.id, self.serialized.len());
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Expand/Collapse
    // -------------------------------------------------------------------------

    /// Flip a node's expanded flag, notify, and rebuild the rows.
    pub fn toggle_node(&mut self, node: &TreeNode<D>) {
        if node.toggle() {
            self.emit(TableEvent::NodeExpand(node.clone()));
        } else {
            self.emit(TableEvent::NodeCollapse(node.clone()));
        }
        self.update_serialized_value();
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Sort mode.
    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Single-mode sort field.
    pub fn sort_field(&self) -> Option<&str> {
        self.sort_field.as_deref()
    }

    /// Single-mode sort order.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Multi-mode descriptor chain.
    pub fn multi_sort_meta(&self) -> Option<&[SortMeta]> {
        self.multi_sort_meta.as_deref()
    }

    /// Set the single-mode sort field and re-sort.
    ///
    /// In lazy mode nothing happens until `init` has run.
    pub fn set_sort_field(&mut self, field: impl Into<String>) {
        self.sort_field = Some(field.into());
        if self.may_sort() && self.sort_mode == SortMode::Single {
            self.sort_single();
        }
    }

    /// Set the single-mode sort order and re-sort.
    ///
    /// In lazy mode nothing happens until `init` has run.
    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
        if self.may_sort() && self.sort_mode == SortMode::Single {
            self.sort_single();
        }
    }

    /// Set the multi-mode descriptor chain and re-sort.
    ///
    /// In lazy mode nothing happens until `init` has run.
    pub fn set_multi_sort_meta(&mut self, metas: Vec<SortMeta>) {
        self.multi_sort_meta = Some(metas);
        if self.may_sort() && self.sort_mode == SortMode::Multiple {
            self.sort_multiple();
        }
    }

    fn may_sort(&self) -> bool {
        !self.lazy || self.initialized
    }

    /// Handle a header click on `field`.
    ///
    /// `multi_modifier` is the meta/ctrl key state of the click; it only
    /// matters in multiple mode, where it extends the chain instead of
    /// replacing it.
    pub fn request_sort(&mut self, field: &str, multi_modifier: bool) {
        match self.sort_mode {
            SortMode::Single => {
                self.sort_order = if self.sort_field.as_deref() == Some(field) {
                    self.sort_order.reversed()
                } else {
                    self.default_sort_order
                };
                self.sort_field = Some(field.to_string());
                self.sort_single();
            }
            SortMode::Multiple => {
                let default_order = self.default_sort_order;
                let metas = self.multi_sort_meta.get_or_insert_with(Vec::new);
                match metas.iter().position(|m| m.field == field) {
                    Some(index) if multi_modifier => {
                        metas[index].order = metas[index].order.reversed();
                    }
                    Some(index) => {
                        let order = metas[index].order.reversed();
                        *metas = vec![SortMeta::new(field, order)];
                    }
                    None => {
                        if !multi_modifier {
                            metas.clear();
                        }
                        metas.push(SortMeta::new(field, default_order));
                    }
                }
                self.sort_multiple();
            }
        }
    }

    /// The active sort, if any.
    pub fn sort_state(&self) -> Option<SortState> {
        match self.sort_mode {
            SortMode::Single => self
                .sort_field
                .as_ref()
                .map(|field| SortState::Single(SortMeta::new(field.clone(), self.sort_order))),
            SortMode::Multiple => self.multi_sort_meta.clone().map(SortState::Multiple),
        }
    }

    /// Whether `field` takes part in the active sort.
    pub fn is_sorted(&self, field: &str) -> bool {
        match self.sort_mode {
            SortMode::Single => self.sort_field.as_deref() == Some(field),
            SortMode::Multiple => self.sort_meta(field).is_some(),
        }
    }

    /// The multi-mode descriptor for `field`.
    pub fn sort_meta(&self, field: &str) -> Option<&SortMeta> {
        self.multi_sort_meta
            .as_ref()
            .and_then(|metas| metas.iter().find(|m| m.field == field))
    }

    fn sort_single(&mut self) {
        let Some(field) = self.sort_field.clone() else {
            trace!("{} sort skipped: no sort field", self.id);
            return;
        };
        if self.reset_page_on_sort {
            self.pagination.first = 0;
        }

        let state = SortState::Single(SortMeta::new(field, self.sort_order));
        if self.lazy {
            self.emit(TableEvent::LazyLoad(self.lazy_load_metadata()));
        } else {
            self.run_sort(&state);
        }

        self.finish_sort(state);
    }

    fn sort_multiple(&mut self) {
        let Some(metas) = self.multi_sort_meta.clone() else {
            trace!("{} sort skipped: no sort meta", self.id);
            return;
        };

        let state = SortState::Multiple(metas);
        if self.lazy {
            self.emit(TableEvent::LazyLoad(self.lazy_load_metadata()));
        } else {
            self.run_sort(&state);
        }

        self.finish_sort(state);
    }

    fn run_sort(&self, state: &SortState) {
        debug!("{} sorting: {:?}", self.id, state);
        if self.custom_sort {
            let events = &self.events;
            let handler =
                |event: CustomSortEvent<D>| events.publish(&TableEvent::SortFunction(event));
            sort_forest(&self.value, state, &SortStrategy::Custom(&handler));
        } else {
            sort_forest(&self.value, state, &SortStrategy::Local);
        }
    }

    fn finish_sort(&mut self, state: SortState) {
        self.service.on_sort(&state);
        self.emit(TableEvent::Sort(state));
        self.update_serialized_value();
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Current page window and record count.
    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    /// Paginator settings, if paginated.
    pub fn paginator(&self) -> Option<&PaginatorConfig> {
        self.paginator.as_ref()
    }

    /// Move to a new page window.
    ///
    /// In lazy mode the caller is asked to load the page; otherwise the rows
    /// are rebuilt from the new window.
    pub fn change_page(&mut self, first: usize, rows: usize) {
        self.pagination.first = first;
        self.pagination.rows = rows;
        debug!("{} page changed: first={} rows={}", self.id, first, rows);

        if self.lazy {
            self.emit(TableEvent::LazyLoad(self.lazy_load_metadata()));
        } else {
            self.serialized = serialize_page(&self.value, first, rows, false);
            self.dirty = true;
        }

        self.emit(TableEvent::Page(PageEvent { first, rows }));
    }

    /// Total record count.
    pub fn total_records(&self) -> usize {
        self.pagination.total_records
    }

    /// Set the total record count (lazy callers report the remote count).
    pub fn set_total_records(&mut self, total: usize) {
        self.update_total_records(total);
    }

    fn update_total_records(&mut self, total: usize) {
        if self.pagination.total_records != total {
            self.pagination.total_records = total;
            self.service.on_total_records_change(total);
        }
    }

    /// What the caller must fetch in lazy mode.
    pub fn lazy_load_metadata(&self) -> LazyLoadEvent {
        LazyLoadEvent {
            first: self.pagination.first,
            rows: self.pagination.rows,
            sort_field: self.sort_field.clone(),
            sort_order: self.sort_order,
            multi_sort_meta: self.multi_sort_meta.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Flags
    // -------------------------------------------------------------------------

    /// Whether loading and sorting are delegated to the caller.
    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    /// Whether the loading overlay is shown.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Show or hide the loading overlay.
    pub fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.dirty = true;
        }
    }

    /// Whether the table renders with scrollable regions.
    pub fn is_scrollable(&self) -> bool {
        self.scrollable
    }

    /// Scrollable body height, if set.
    pub fn scroll_height(&self) -> Option<ScrollHeight> {
        self.scroll_height
    }

    /// Width of the frozen column region, if any.
    pub fn frozen_width(&self) -> Option<&str> {
        self.frozen_width.as_deref()
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// The internal notification service.
    pub fn service(&self) -> &TableService<D> {
        &self.service
    }

    /// The output event channel.
    pub fn events(&self) -> &EventChannel<D> {
        &self.events
    }

    /// Listen to output events.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(
        &self,
        listener: impl Fn(&TableEvent<D>) + Send + Sync + 'static,
    ) -> Subscription {
        self.events.subscribe(listener)
    }

    /// Announce a selection change to the presentation shell.
    pub fn notify_selection_change(&self) {
        self.service.on_selection_change();
    }

    /// Announce a context menu request on `node`.
    pub fn notify_context_menu(&self, node: &TreeNode<D>) {
        self.service.on_context_menu(node);
    }

    fn emit(&self, event: TableEvent<D>) {
        debug!("{} emitting {}", self.id, event.name());
        self.events.publish(&event);
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the rows or flags changed since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl<D: RowData + 'static> Default for TreeTable<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> std::fmt::Debug for TreeTable<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeTable")
            .field("id", &self.id)
            .field("records", &self.value.len())
            .field("rows", &self.serialized.len())
            .field("lazy", &self.lazy)
            .field("pagination", &self.pagination)
            .field("sort_mode", &self.sort_mode)
            .field("sort_field", &self.sort_field)
            .field("sort_order", &self.sort_order)
            .field("multi_sort_meta", &self.multi_sort_meta)
            .finish_non_exhaustive()
    }
}
