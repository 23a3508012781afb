//! View model: what the user sees, updated by route handlers and bus events.
//!
//! - [`Screen`], [`ViewState`] - plain state with a text rendering
//! - [`View`] - subscriber for `loading`, `error` and `weather:loaded`

mod presenter;
mod screen;

pub use presenter::View;
pub use screen::{Screen, ViewState};
