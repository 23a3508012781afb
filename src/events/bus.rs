//! # Named publish/subscribe registry.
//!
//! [`EventBus`] maps an event name to an ordered list of callbacks. Producers
//! (route handlers, search actions) call [`EventBus::emit`]; consumers (view,
//! history persistence, logging) register with [`EventBus::on`] or
//! [`EventBus::subscribe`] and never learn about each other.
//!
//! ## Architecture
//! ```text
//! Producers:                        Consumers (registration order):
//!   route handler ──┐
//!   search_city   ──┼──► emit("weather:loaded", payload) ──► cb #1 ──► cb #2 ──► cb #N
//!   search_geo    ──┘           (synchronous)                  │
//!                                                              └─ panic → warn!, continue
//! ```
//!
//! ## Rules
//! - **Ordering**: callbacks run in registration order, synchronously, within `emit`.
//! - **Duplicates**: registering the same callback twice delivers twice.
//! - **Identity**: `off` compares callbacks by `Arc` pointer and removes every registration.
//! - **Lazy keys**: the list for a name is created on first `on` and kept (possibly empty) forever.
//! - **Snapshot**: `emit` delivers to the list as it was when the call started; callbacks
//!   may call `on`/`off`/`emit` on the same bus.
//! - **Isolation**: a panicking callback is logged and skipped; later callbacks still run.
//! - **No awaiting**: asynchronous work started inside a callback reports back via a later `emit`.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::subscribers::Subscribe;

/// Shared callback handle. Keep a clone to unregister it later with [`EventBus::off`].
pub type Callback<P> = Arc<dyn Fn(&P) + Send + Sync + 'static>;

/// Wraps a closure into a [`Callback`].
pub fn callback<P, F>(f: F) -> Callback<P>
where
    F: Fn(&P) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Registrations created by [`EventBus::subscribe`]; pass back to [`EventBus::unsubscribe`].
pub struct Subscription<P> {
    name: &'static str,
    entries: Vec<(&'static str, Callback<P>)>,
}

impl<P> Subscription<P> {
    /// Subscriber name (for logs).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Event names this subscription listens to.
    pub fn events(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(event, _)| *event)
    }
}

/// Publish/subscribe registry keyed by event name.
///
/// Construct one per application and share it by `Arc`.
pub struct EventBus<P> {
    events: RwLock<HashMap<String, Vec<Callback<P>>>>,
}

impl<P: 'static> EventBus<P> {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `cb` for every future emission of `event`.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use skycast::{callback, EventBus};
    ///
    /// let bus: EventBus<i32> = EventBus::new();
    /// let seen = Arc::new(AtomicUsize::new(0));
    /// let s = seen.clone();
    /// let cb = callback(move |v: &i32| { s.fetch_add(*v as usize, Ordering::SeqCst); });
    ///
    /// bus.on("e", cb.clone());
    /// bus.emit("e", 5);
    /// bus.off("e", &cb);
    /// bus.emit("e", 6);
    /// assert_eq!(seen.load(Ordering::SeqCst), 5);
    /// ```
    pub fn on(&self, event: impl Into<String>, cb: Callback<P>) {
        let event = event.into();
        tracing::debug!(event = %event, "callback registered");
        self.events.write().entry(event).or_default().push(cb);
    }

    /// Removes every registration of `cb` (pointer identity) from `event`.
    ///
    /// Unknown events and unregistered callbacks are a silent no-op. The event key is kept.
    pub fn off(&self, event: &str, cb: &Callback<P>) {
        let mut events = self.events.write();
        if let Some(list) = events.get_mut(event) {
            let before = list.len();
            list.retain(|registered| !Arc::ptr_eq(registered, cb));
            if list.len() != before {
                tracing::debug!(event, removed = before - list.len(), "callback removed");
            }
        }
    }

    /// Delivers `payload` to every callback registered for `event`, in registration order.
    ///
    /// Never-subscribed events are a no-op.
    pub fn emit(&self, event: &str, payload: P) {
        let callbacks = match self.events.read().get(event) {
            Some(list) => list.clone(),
            None => return,
        };

        for (index, cb) in callbacks.iter().enumerate() {
            if let Err(panic_err) = panic::catch_unwind(AssertUnwindSafe(|| cb(&payload))) {
                let info = panic_message(&*panic_err);
                tracing::warn!(event, callback = index, info = %info, "subscriber panicked");
            }
        }
    }

    /// Registers a named subscriber for each event it declares.
    pub fn subscribe(&self, sub: Arc<dyn Subscribe<P>>) -> Subscription<P> {
        let name = sub.name();
        let mut entries = Vec::with_capacity(sub.events().len());

        for &event in sub.events() {
            let s = Arc::clone(&sub);
            let cb: Callback<P> = Arc::new(move |payload: &P| s.on_event(event, payload));
            self.on(event, Arc::clone(&cb));
            entries.push((event, cb));
        }
        tracing::debug!(subscriber = name, events = entries.len(), "subscriber attached");
        Subscription { name, entries }
    }

    /// Detaches everything registered by [`EventBus::subscribe`].
    pub fn unsubscribe(&self, subscription: &Subscription<P>) {
        for (event, cb) in &subscription.entries {
            self.off(event, cb);
        }
        tracing::debug!(subscriber = subscription.name, "subscriber detached");
    }

    /// Number of callbacks currently registered for `event`.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.events.read().get(event).map_or(0, Vec::len)
    }

    /// Returns true once `event` has ever been subscribed to.
    pub fn has_event(&self, event: &str) -> bool {
        self.events.read().contains_key(event)
    }
}

impl<P: 'static> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> Callback<i32> {
        let log = Arc::clone(log);
        callback(move |v: &i32| log.lock().push(format!("{tag}:{v}")))
    }

    #[test]
    fn on_emit_off_delivers_once() {
        let bus = EventBus::new();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let c = Arc::clone(&calls);
        let cb = callback(move |v: &i32| c.lock().push(*v));

        bus.on("e", cb.clone());
        bus.emit("e", 5);
        bus.off("e", &cb);
        bus.emit("e", 6);

        assert_eq!(*calls.lock(), vec![5]);
    }

    #[test]
    fn delivers_in_registration_order_with_same_payload() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        bus.on("e", recorder(&log, "a"));
        bus.on("e", recorder(&log, "b"));
        bus.on("e", recorder(&log, "c"));

        bus.emit("e", 7);

        assert_eq!(*log.lock(), vec!["a:7", "b:7", "c:7"]);
    }

    #[test]
    fn duplicate_registration_delivers_twice_and_off_removes_all() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let cb = callback(move |_: &i32| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        bus.on("e", cb.clone());
        bus.on("e", cb.clone());
        bus.emit("e", 0);
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        bus.off("e", &cb);
        bus.emit("e", 0);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn off_keeps_event_key() {
        let bus = EventBus::new();
        let cb = callback(|_: &i32| {});
        bus.on("e", cb.clone());
        bus.off("e", &cb);

        assert!(bus.has_event("e"));
        assert_eq!(bus.subscriber_count("e"), 0);
    }

    #[test]
    fn unknown_event_and_callback_are_no_ops() {
        let bus: EventBus<i32> = EventBus::new();
        let cb = callback(|_: &i32| {});
        bus.off("missing", &cb);
        bus.emit("missing", 1);
        assert!(!bus.has_event("missing"));

        bus.on("e", callback(|_: &i32| {}));
        bus.off("e", &cb);
        assert_eq!(bus.subscriber_count("e"), 1);
    }

    #[test]
    fn panicking_callback_does_not_stop_delivery() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        bus.on("e", recorder(&log, "first"));
        bus.on("e", callback(|_: &i32| panic!("boom")));
        bus.on("e", recorder(&log, "last"));

        bus.emit("e", 1);

        assert_eq!(*log.lock(), vec!["first:1", "last:1"]);
    }

    #[test]
    fn callbacks_may_reenter_the_bus() {
        let bus = Arc::new(EventBus::new());
        let log = Arc::new(Mutex::new(Vec::new()));
        bus.on("inner", recorder(&log, "inner"));

        let b = Arc::clone(&bus);
        let late = recorder(&log, "late");
        bus.on(
            "outer",
            callback(move |v: &i32| {
                b.emit("inner", v + 1);
                b.on("outer", late.clone());
            }),
        );

        bus.emit("outer", 1);
        assert_eq!(*log.lock(), vec!["inner:2"]);
        assert_eq!(bus.subscriber_count("outer"), 2);
    }

    struct Counter {
        hits: AtomicUsize,
    }

    impl Subscribe<i32> for Counter {
        fn on_event(&self, _event: &str, payload: &i32) {
            self.hits.fetch_add(*payload as usize, Ordering::SeqCst);
        }

        fn events(&self) -> &[&'static str] {
            &["a", "b"]
        }
    }

    #[test]
    fn subscribe_and_unsubscribe_named_subscriber() {
        let bus: EventBus<i32> = EventBus::new();
        let counter = Arc::new(Counter {
            hits: AtomicUsize::new(0),
        });

        let sub = bus.subscribe(counter.clone());
        assert_eq!(sub.events().collect::<Vec<_>>(), vec!["a", "b"]);
        bus.emit("a", 1);
        bus.emit("b", 10);
        assert_eq!(counter.hits.load(Ordering::SeqCst), 11);

        bus.unsubscribe(&sub);
        bus.emit("a", 100);
        assert_eq!(counter.hits.load(Ordering::SeqCst), 11);
        assert_eq!(bus.subscriber_count("a"), 0);
    }
}
