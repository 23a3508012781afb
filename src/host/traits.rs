//! # Host environment contract.
//!
//! The router never touches a browser directly. Everything it needs from the
//! host - current location, history push, back/forward and click signals,
//! navigation links - goes through [`Host`].
//!
//! ```text
//! Router::init ──► Host::on_popstate(listener) ──► navigate(None)
//!              └─► Host::on_click(listener)    ──► closest a[data-router] → go(href)
//! Router::go   ──► Host::push_state(path)
//! Router::update_active_nav ──► Host::nav_hrefs / Host::set_nav_active
//! ```

use std::sync::Arc;

use super::ClickEvent;

/// Back/forward navigation listener.
pub type PopListener = Arc<dyn Fn() + Send + Sync + 'static>;

/// Click listener; returns `true` when it prevented the default full-page navigation.
pub type ClickListener = Arc<dyn Fn(&ClickEvent) -> bool + Send + Sync + 'static>;

/// Browser-like host the router runs in.
pub trait Host: Send + Sync + 'static {
    /// Path of the current location.
    fn location(&self) -> String;

    /// Pushes `path` onto the history stack and makes it the current location.
    fn push_state(&self, path: &str);

    /// Steps one history entry back, firing popstate; `false` when already at the oldest.
    fn history_back(&self) -> bool;

    /// Registers a listener for back/forward navigation.
    fn on_popstate(&self, listener: PopListener);

    /// Registers a document-wide click listener.
    fn on_click(&self, listener: ClickListener);

    /// Declared targets of the navigation links, in document order.
    fn nav_hrefs(&self) -> Vec<Option<String>>;

    /// Marks the navigation link at `index` as active or inactive.
    fn set_nav_active(&self, index: usize, active: bool);
}
