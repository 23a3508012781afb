//! Application events: named bus and payload types.
//!
//! ## Contents
//! - [`EventBus`] ordered, synchronous, name-keyed publish/subscribe
//! - [`Payload`] and the event names [`LOADING`], [`ERROR`], [`WEATHER_LOADED`]
//!
//! ## Quick reference
//! - **Publishers**: route handlers and search actions in `app`.
//! - **Consumers**: `View`, `HistoryRecorder`, `LogWriter` (feature `logging`).

mod bus;
mod payload;

pub use bus::{callback, Callback, EventBus, Subscription};
pub use payload::{Payload, WeatherLoaded, ERROR, LOADING, WEATHER_LOADED};
