//! Per-table publish/subscribe channels.
//!
//! Every table owns one [`TableService`]. Listeners (sort indicators,
//! scrollable views, application code) subscribe to a topic and get a
//! [`Subscription`] back; dropping it removes the listener. Calling
//! [`TableService::teardown`] releases every listener at once.

use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use log::{debug, trace};

use crate::node::{NodeList, TreeNode};
use crate::sort::SortState;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Internal listener registry.
struct ChannelInner<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

/// A broadcast channel with explicit subscription handles.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use treetable::service::Channel;
///
/// let channel: Channel<usize> = Channel::new();
/// let seen = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&seen);
/// let subscription = channel.subscribe(move |n| {
///     counter.fetch_add(*n, Ordering::SeqCst);
/// });
///
/// channel.publish(&3);
/// drop(subscription);
/// channel.publish(&4);
/// assert_eq!(seen.load(Ordering::SeqCst), 3);
/// ```
pub struct Channel<T> {
    inner: Arc<RwLock<ChannelInner<T>>>,
}

impl<T: 'static> Channel<T> {
    /// Create a channel with no listeners.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ChannelInner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener. It stays registered until the returned
    /// subscription is dropped or unsubscribed, or the channel is cleared.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = match self.inner.write() {
            Ok(mut guard) => {
                let id = guard.next_id;
                guard.next_id += 1;
                guard.listeners.push((id, Arc::new(listener)));
                id
            }
            Err(_) => return Subscription::inert(),
        };

        let weak: Weak<RwLock<ChannelInner<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade()
                    && let Ok(mut guard) = inner.write()
                {
                    guard.listeners.retain(|(listener_id, _)| *listener_id != id);
                }
            })),
        }
    }

    /// Deliver a value to every current listener.
    ///
    /// Listeners are snapshotted first, so a listener may subscribe or
    /// unsubscribe while being called.
    pub fn publish(&self, value: &T) {
        let listeners: Vec<Listener<T>> = self
            .inner
            .read()
            .map(|g| g.listeners.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default();
        trace!("publishing to {} listeners", listeners.len());
        for listener in listeners {
            listener(value);
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.read().map(|g| g.listeners.len()).unwrap_or(0)
    }

    /// Remove every listener.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.listeners.clear();
        }
    }
}

impl<T: 'static> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.inner.read().map(|g| g.listeners.len()).unwrap_or(0);
        f.debug_struct("Channel").field("listeners", &count).finish()
    }
}

/// Handle to a registered listener. Dropping it unsubscribes.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn inert() -> Self {
        Self { release: None }
    }

    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

// =============================================================================
// TableService
// =============================================================================

/// Notification topics shared by one table and its presentation pieces.
pub struct TableService<D> {
    /// Completed sorts.
    pub sort: Channel<SortState>,
    /// Selection changes.
    pub selection: Channel<()>,
    /// Context menu requests on a node.
    pub context_menu: Channel<TreeNode<D>>,
    /// Forest replaced.
    pub value: Channel<NodeList<D>>,
    /// Total record count changed.
    pub total_records: Channel<usize>,
}

impl<D: 'static> TableService<D> {
    /// Create a service with empty topics.
    pub fn new() -> Self {
        Self {
            sort: Channel::new(),
            selection: Channel::new(),
            context_menu: Channel::new(),
            value: Channel::new(),
            total_records: Channel::new(),
        }
    }

    /// Broadcast a completed sort.
    pub fn on_sort(&self, state: &SortState) {
        self.sort.publish(state);
    }

    /// Broadcast a selection change.
    pub fn on_selection_change(&self) {
        self.selection.publish(&());
    }

    /// Broadcast a context menu request.
    pub fn on_context_menu(&self, node: &TreeNode<D>) {
        self.context_menu.publish(node);
    }

    /// Broadcast a forest replacement.
    pub fn on_value_change(&self, value: &NodeList<D>) {
        self.value.publish(value);
    }

    /// Broadcast a new total record count.
    pub fn on_total_records_change(&self, total: usize) {
        self.total_records.publish(&total);
    }

    /// Total listeners across all topics.
    pub fn listener_count(&self) -> usize {
        self.sort.listener_count()
            + self.selection.listener_count()
            + self.context_menu.listener_count()
            + self.value.listener_count()
            + self.total_records.listener_count()
    }

    /// Release every listener on every topic.
    pub fn teardown(&self) {
        debug!("tearing down {} service listeners", self.listener_count());
        self.sort.clear();
        self.selection.clear();
        self.context_menu.clear();
        self.value.clear();
        self.total_records.clear();
    }
}

impl<D: 'static> Default for TableService<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> fmt::Debug for TableService<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableService")
            .field("sort", &self.sort)
            .field("selection", &self.selection)
            .field("context_menu", &self.context_menu)
            .field("value", &self.value)
            .field("total_records", &self.total_records)
            .finish()
    }
}
