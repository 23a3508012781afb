//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait and the built-in logging
//! subscriber for events broadcast through the [`EventBus`](crate::EventBus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   route handler ── emit(name, Payload) ──► EventBus ──► callbacks in registration order
//!                                                             │
//!                                                   ┌─────────┼──────────────┐
//!                                                   ▼         ▼              ▼
//!                                           HistoryRecorder  View       LogWriter
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** - observe and report events (LogWriter)
//! - **Stateful subscribers** - maintain state from events (View, HistoryRecorder)

#[cfg(feature = "logging")]
mod log;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscribe::Subscribe;
