//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging named consumers into an
//! [`EventBus`](crate::EventBus). A subscriber declares which event names it
//! wants; [`EventBus::subscribe`](crate::EventBus::subscribe) registers one
//! callback per name and returns a handle for detaching them again.
//!
//! ## Contract
//! - `on_event` runs synchronously inside `emit`; long work should be spawned.
//! - A panic inside `on_event` is logged by the bus and does not reach other subscribers.
//! - Subscribers hold no reference to the router or the bus internals.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use skycast::{EventBus, Payload, Subscribe, LOADING};
//!
//! struct Spinner;
//!
//! impl Subscribe<Payload> for Spinner {
//!     fn on_event(&self, _event: &str, payload: &Payload) {
//!         if let Some(on) = payload.as_loading() {
//!             println!("spinner: {on}");
//!         }
//!     }
//!     fn events(&self) -> &[&'static str] { &[LOADING] }
//!     fn name(&self) -> &'static str { "spinner" }
//! }
//!
//! let bus: EventBus<Payload> = EventBus::new();
//! let sub = bus.subscribe(Arc::new(Spinner));
//! bus.emit(LOADING, Payload::loading(true));
//! bus.unsubscribe(&sub);
//! ```

/// Contract for named event consumers.
pub trait Subscribe<P>: Send + Sync + 'static {
    /// Handle a single emission of `event`.
    fn on_event(&self, event: &str, payload: &P);

    /// Event names this subscriber listens to.
    fn events(&self) -> &[&'static str];

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
