//! Sortable column headers and sort icons.
//!
//! Both listen to the table's sort topic so that every header reflects the
//! latest completed sort, including sorts started elsewhere.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI8, Ordering};

use log::trace;

use crate::service::Subscription;
use crate::sort::{SortMode, SortOrder};
use crate::table::TreeTable;
use crate::value::RowData;

// =============================================================================
// SortableColumn
// =============================================================================

/// A header cell that sorts by `field` when clicked.
#[derive(Debug)]
pub struct SortableColumn {
    field: String,
    disabled: bool,
    sorted: Arc<AtomicBool>,
    subscription: Option<Subscription>,
}

impl SortableColumn {
    /// Create a column bound to `table`.
    pub fn new<D: RowData + 'static>(table: &TreeTable<D>, field: impl Into<String>) -> Self {
        let field = field.into();
        let sorted = Arc::new(AtomicBool::new(table.is_sorted(&field)));

        let flag = Arc::clone(&sorted);
        let watched = field.clone();
        let subscription = table.service().sort.subscribe(move |state| {
            flag.store(state.is_sorted(&watched), Ordering::SeqCst);
        });

        Self {
            field,
            disabled: false,
            sorted,
            subscription: Some(subscription),
        }
    }

    /// Create a column that ignores clicks and sort notices.
    pub fn disabled(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            disabled: true,
            sorted: Arc::new(AtomicBool::new(false)),
            subscription: None,
        }
    }

    /// The field this column sorts by.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Whether clicks are ignored.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the column takes part in the active sort.
    pub fn is_sorted(&self) -> bool {
        self.sorted.load(Ordering::SeqCst)
    }

    /// Forward a click to the table. Returns false when disabled.
    pub fn click<D: RowData + 'static>(
        &self,
        table: &mut TreeTable<D>,
        multi_modifier: bool,
    ) -> bool {
        if self.disabled {
            return false;
        }
        trace!("header click on '{}' (modifier={})", self.field, multi_modifier);
        table.request_sort(&self.field, multi_modifier);
        true
    }

    /// Stop listening to sort notices.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

// =============================================================================
// SortIcon
// =============================================================================

/// The direction arrow shown next to a sortable header.
#[derive(Debug)]
pub struct SortIcon {
    field: String,
    order: Arc<AtomicI8>,
    _subscription: Subscription,
}

impl SortIcon {
    /// Create an icon bound to `table`.
    pub fn new<D: RowData + 'static>(table: &TreeTable<D>, field: impl Into<String>) -> Self {
        let field = field.into();
        let initial = match table.sort_mode() {
            SortMode::Single if table.is_sorted(&field) => table.sort_order().as_i8(),
            SortMode::Single => 0,
            SortMode::Multiple => table
                .sort_meta(&field)
                .map(|meta| meta.order.as_i8())
                .unwrap_or(0),
        };
        let order = Arc::new(AtomicI8::new(initial));

        let slot = Arc::clone(&order);
        let watched = field.clone();
        let subscription = table.service().sort.subscribe(move |state| {
            slot.store(state.order_for(&watched), Ordering::SeqCst);
        });

        Self {
            field,
            order,
            _subscription: subscription,
        }
    }

    /// The field this icon tracks.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Current direction, or `None` when the field is unsorted.
    pub fn order(&self) -> Option<SortOrder> {
        SortOrder::try_from(self.order.load(Ordering::SeqCst)).ok()
    }

    /// Glyph for the current direction.
    pub fn glyph(&self) -> &'static str {
        match self.order() {
            Some(SortOrder::Ascending) => "▲",
            Some(SortOrder::Descending) => "▼",
            None => "⇅",
        }
    }
}
