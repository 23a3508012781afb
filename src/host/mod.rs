//! Host environment: the browser as seen by the router.
//!
//! - [`Host`] - location, history push, back/forward and click signals, nav links
//! - [`Element`], [`ClickEvent`] - click target and ancestor chain
//! - [`MemoryHost`] - in-memory implementation

mod dom;
mod memory;
mod traits;

pub use dom::{ClickEvent, Element};
pub use memory::{MemoryHost, NavLink};
pub use traits::{ClickListener, Host, PopListener};
