use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use treetable::service::{Channel, Subscription, TableService};
use treetable::sort::{SortMeta, SortState};

fn counter() -> (Arc<AtomicUsize>, impl Fn(&usize) + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&count);
    (count, move |_: &usize| {
        inner.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn test_publish_reaches_every_listener() {
    let channel: Channel<usize> = Channel::new();
    let (a, listener_a) = counter();
    let (b, listener_b) = counter();
    let _sa = channel.subscribe(listener_a);
    let _sb = channel.subscribe(listener_b);

    channel.publish(&1);
    channel.publish(&2);

    assert_eq!(a.load(Ordering::SeqCst), 2);
    assert_eq!(b.load(Ordering::SeqCst), 2);
}

#[test]
fn test_unsubscribe_is_independent() {
    let channel: Channel<usize> = Channel::new();
    let (a, listener_a) = counter();
    let (b, listener_b) = counter();
    let sa = channel.subscribe(listener_a);
    let _sb = channel.subscribe(listener_b);

    sa.unsubscribe();
    channel.publish(&1);

    assert_eq!(a.load(Ordering::SeqCst), 0);
    assert_eq!(b.load(Ordering::SeqCst), 1);
    assert_eq!(channel.listener_count(), 1);
}

#[test]
fn test_dropping_subscription_unsubscribes() {
    let channel: Channel<usize> = Channel::new();
    let (count, listener) = counter();
    {
        let _subscription = channel.subscribe(listener);
        channel.publish(&1);
    }
    channel.publish(&2);

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(channel.listener_count(), 0);
}

#[test]
fn test_subscription_outliving_channel() {
    let channel: Channel<usize> = Channel::new();
    let (_, listener) = counter();
    let subscription = channel.subscribe(listener);

    drop(channel);
    subscription.unsubscribe();
}

#[test]
fn test_listener_may_subscribe_during_publish() {
    let channel: Arc<Channel<usize>> = Arc::new(Channel::new());
    let late: Arc<Mutex<Vec<Subscription>>> = Arc::new(Mutex::new(Vec::new()));

    let weak = Arc::downgrade(&channel);
    let holder = Arc::clone(&late);
    let _sub = channel.subscribe(move |_| {
        if let Some(channel) = weak.upgrade() {
            holder.lock().unwrap().push(channel.subscribe(|_| {}));
        }
    });

    channel.publish(&1);

    assert_eq!(channel.listener_count(), 2);
    assert_eq!(late.lock().unwrap().len(), 1);
}

#[test]
fn test_teardown_releases_all_topics() {
    let service: TableService<Value> = TableService::new();
    let sorts = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&sorts);
    let _a = service.sort.subscribe(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    let _b = service.selection.subscribe(|_| {});
    let _c = service.value.subscribe(|_| {});
    let _d = service.total_records.subscribe(|_| {});
    let _e = service.context_menu.subscribe(|_| {});
    assert_eq!(service.listener_count(), 5);

    service.on_sort(&SortState::Single(SortMeta::asc("name")));
    service.teardown();
    service.on_sort(&SortState::Single(SortMeta::asc("name")));

    assert_eq!(service.listener_count(), 0);
    assert_eq!(sorts.load(Ordering::SeqCst), 1);
}

#[test]
fn test_sort_state_helpers() {
    let single = SortState::Single(SortMeta::desc("size"));
    assert!(single.is_sorted("size"));
    assert_eq!(single.order_for("size"), -1);
    assert_eq!(single.order_for("name"), 0);

    let multiple = SortState::Multiple(vec![SortMeta::asc("kind"), SortMeta::desc("size")]);
    assert_eq!(multiple.order_for("kind"), 1);
    assert_eq!(multiple.sort_meta("size"), Some(&SortMeta::desc("size")));
    assert!(!multiple.is_sorted("name"));
}
