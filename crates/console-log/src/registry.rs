//! Ordered subscriber list with a per-call panic boundary.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use logpanel_protocol::constants::SUBSCRIBER_ERROR_PREFIX;
use logpanel_protocol::{LogEntry, LogKind};

use crate::channel::Channel;

/// Callback invoked with each new entry.
pub type SubscriberFn = Arc<dyn Fn(&LogEntry) + Send + Sync + 'static>;

/// Handle returned by [`SubscriberRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

#[derive(Default)]
pub struct SubscriberRegistry {
    inner: Mutex<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    subscribers: Vec<(SubscriberId, SubscriberFn)>,
    next_id: u64,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a subscriber. The same callback may be registered more than
    /// once; each registration gets its own id.
    pub fn subscribe(&self, callback: SubscriberFn) -> SubscriberId {
        let mut state = self.lock();
        let id = SubscriberId(state.next_id);
        state.next_id += 1;
        state.subscribers.push((id, callback));
        id
    }

    /// Removes a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut state = self.lock();
        match state.subscribers.iter().position(|(sid, _)| *sid == id) {
            Some(index) => {
                state.subscribers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes the first registration of exactly this callback.
    pub fn unsubscribe_callback(&self, callback: &SubscriberFn) -> bool {
        let mut state = self.lock();
        match state
            .subscribers
            .iter()
            .position(|(_, cb)| Arc::ptr_eq(cb, callback))
        {
            Some(index) => {
                state.subscribers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invokes every subscriber in registration order.
    ///
    /// Works on a snapshot, so subscribers may log, subscribe or unsubscribe
    /// from inside the callback. A panicking subscriber is reported on the
    /// `fallback` error channel and the rest still run.
    ///
    /// The process panic hook runs before the panic is caught here, so the
    /// default hook still prints its `thread '…' panicked at` line to stderr.
    /// Hosts that want the report only on `fallback` install a quieter hook
    /// with [`std::panic::set_hook`].
    pub fn notify(&self, entry: &LogEntry, fallback: &dyn Channel) {
        let snapshot: Vec<SubscriberFn> = self
            .lock()
            .subscribers
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        for subscriber in snapshot {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| subscriber(entry))) {
                let reason = panic_message(payload.as_ref());
                fallback.write(
                    LogKind::Error,
                    &format!("{SUBSCRIBER_ERROR_PREFIX} {reason}"),
                );
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegistryState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "subscriber panicked"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::channel::testing::RecordingChannel;

    fn exploding(_: &LogEntry) {
        panic!("listener exploded")
    }

    fn reject(entry: &LogEntry) {
        panic!("bad entry {}", entry.message())
    }

    fn counter() -> (Arc<AtomicUsize>, SubscriberFn) {
        let count = Arc::new(AtomicUsize::new(0));
        let count2 = Arc::clone(&count);
        let cb: SubscriberFn = Arc::new(move |_: &LogEntry| {
            count2.fetch_add(1, Ordering::SeqCst);
        });
        (count, cb)
    }

    #[test]
    fn notifies_in_registration_order() {
        let registry = SubscriberRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            registry.subscribe(Arc::new(move |_: &LogEntry| order.lock().unwrap().push(tag)));
        }

        registry.notify(&LogEntry::new(LogKind::Info, "x"), &RecordingChannel::default());
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn duplicate_registration_is_called_twice() {
        let registry = SubscriberRegistry::new();
        let (count, cb) = counter();
        registry.subscribe(Arc::clone(&cb));
        registry.subscribe(cb);

        registry.notify(&LogEntry::new(LogKind::Info, "x"), &RecordingChannel::default());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unsubscribe_by_id() {
        let registry = SubscriberRegistry::new();
        let (count, cb) = counter();
        let id = registry.subscribe(cb);

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        registry.notify(&LogEntry::new(LogKind::Info, "x"), &RecordingChannel::default());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsubscribe_callback_removes_first_match_only() {
        let registry = SubscriberRegistry::new();
        let (count, cb) = counter();
        registry.subscribe(Arc::clone(&cb));
        registry.subscribe(Arc::clone(&cb));

        assert!(registry.unsubscribe_callback(&cb));

        registry.notify(&LogEntry::new(LogKind::Info, "x"), &RecordingChannel::default());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_unknown_callback_is_noop() {
        let registry = SubscriberRegistry::new();
        let (count, cb) = counter();
        let (_, other) = counter();
        registry.subscribe(cb);

        assert!(!registry.unsubscribe_callback(&other));
        registry.notify(&LogEntry::new(LogKind::Info, "x"), &RecordingChannel::default());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn panicking_subscriber_is_isolated_and_reported() {
        let registry = SubscriberRegistry::new();
        let channel = RecordingChannel::default();
        let (count, cb) = counter();

        registry.subscribe(Arc::new(exploding));
        registry.subscribe(cb);

        registry.notify(&LogEntry::new(LogKind::Warn, "x"), &channel);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(
            channel.writes(),
            vec![(
                LogKind::Error,
                "Error in log subscriber: listener exploded".to_string()
            )]
        );
    }

    #[test]
    fn formatted_panic_payload_is_reported() {
        let registry = SubscriberRegistry::new();
        let channel = RecordingChannel::default();
        registry.subscribe(Arc::new(reject));

        registry.notify(&LogEntry::new(LogKind::Info, "42"), &channel);

        assert_eq!(channel.writes()[0].1, "Error in log subscriber: bad entry 42");
    }

    #[test]
    fn subscriber_may_unsubscribe_itself_during_notify() {
        let registry = Arc::new(SubscriberRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let id_slot: Arc<Mutex<Option<SubscriberId>>> = Arc::new(Mutex::new(None));

        let reg = Arc::clone(&registry);
        let slot = Arc::clone(&id_slot);
        let calls2 = Arc::clone(&calls);
        let id = registry.subscribe(Arc::new(move |_: &LogEntry| {
            calls2.fetch_add(1, Ordering::SeqCst);
            if let Some(id) = *slot.lock().unwrap() {
                reg.unsubscribe(id);
            }
        }));
        *id_slot.lock().unwrap() = Some(id);

        let channel = RecordingChannel::default();
        registry.notify(&LogEntry::new(LogKind::Info, "a"), &channel);
        registry.notify(&LogEntry::new(LogKind::Info, "b"), &channel);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!registry.unsubscribe(id));
    }
}
