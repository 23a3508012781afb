//! # In-memory host.
//!
//! [`MemoryHost`] keeps a history stack, navigation links and listener lists in
//! process memory. It is the host used by tests and the demo.
//!
//! ## Rules
//! - `push_state` drops forward entries, appends, and moves to the new entry.
//! - `back`/`forward` move within the stack and fire popstate listeners; at an
//!   edge they do nothing and return `false`.
//! - Listeners are invoked without any internal lock held, so they may call back
//!   into the host.

use parking_lot::Mutex;

use super::{ClickEvent, ClickListener, Host, PopListener};

/// Navigation link as rendered in the page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: Option<String>,
    pub active: bool,
}

struct History {
    entries: Vec<String>,
    index: usize,
}

/// Host backed by process memory.
pub struct MemoryHost {
    history: Mutex<History>,
    nav: Mutex<Vec<NavLink>>,
    pop_listeners: Mutex<Vec<PopListener>>,
    click_listeners: Mutex<Vec<ClickListener>>,
}

impl MemoryHost {
    /// Starts at `location` with no navigation links.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            history: Mutex::new(History {
                entries: vec![location.into()],
                index: 0,
            }),
            nav: Mutex::new(Vec::new()),
            pop_listeners: Mutex::new(Vec::new()),
            click_listeners: Mutex::new(Vec::new()),
        }
    }

    /// Adds navigation links with the given targets.
    #[must_use]
    pub fn with_nav_links<'a>(self, hrefs: impl IntoIterator<Item = &'a str>) -> Self {
        self.nav.lock().extend(hrefs.into_iter().map(|href| NavLink {
            href: Some(href.to_string()),
            active: false,
        }));
        self
    }

    /// Goes one entry back; returns `false` at the oldest entry.
    pub fn back(&self) -> bool {
        let moved = {
            let mut h = self.history.lock();
            if h.index == 0 {
                false
            } else {
                h.index -= 1;
                true
            }
        };
        if moved {
            self.fire_popstate();
        }
        moved
    }

    /// Goes one entry forward; returns `false` at the newest entry.
    pub fn forward(&self) -> bool {
        let moved = {
            let mut h = self.history.lock();
            if h.index + 1 >= h.entries.len() {
                false
            } else {
                h.index += 1;
                true
            }
        };
        if moved {
            self.fire_popstate();
        }
        moved
    }

    /// Dispatches a click; returns `true` if any listener prevented the default action.
    pub fn click(&self, ev: &ClickEvent) -> bool {
        let listeners = self.click_listeners.lock().clone();
        let mut prevented = false;
        for listener in listeners {
            prevented |= listener(ev);
        }
        prevented
    }

    /// Snapshot of the history stack, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.history.lock().entries.clone()
    }

    pub fn nav_links(&self) -> Vec<NavLink> {
        self.nav.lock().clone()
    }

    /// Targets of the links currently marked active.
    pub fn active_links(&self) -> Vec<String> {
        self.nav
            .lock()
            .iter()
            .filter(|l| l.active)
            .filter_map(|l| l.href.clone())
            .collect()
    }

    fn fire_popstate(&self) {
        let listeners = self.pop_listeners.lock().clone();
        for listener in listeners {
            listener();
        }
    }
}

impl Host for MemoryHost {
    fn location(&self) -> String {
        let h = self.history.lock();
        h.entries[h.index].clone()
    }

    fn history_back(&self) -> bool {
        self.back()
    }

    fn push_state(&self, path: &str) {
        let mut h = self.history.lock();
        let keep = h.index + 1;
        h.entries.truncate(keep);
        h.entries.push(path.to_string());
        h.index = h.entries.len() - 1;
    }

    fn on_popstate(&self, listener: PopListener) {
        self.pop_listeners.lock().push(listener);
    }

    fn on_click(&self, listener: ClickListener) {
        self.click_listeners.lock().push(listener);
    }

    fn nav_hrefs(&self) -> Vec<Option<String>> {
        self.nav.lock().iter().map(|l| l.href.clone()).collect()
    }

    fn set_nav_active(&self, index: usize, active: bool) {
        if let Some(link) = self.nav.lock().get_mut(index) {
            link.active = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn push_back_forward() {
        let host = MemoryHost::new("/");
        host.push_state("/about");
        host.push_state("/city/Oslo");
        assert_eq!(host.location(), "/city/Oslo");

        assert!(host.back());
        assert_eq!(host.location(), "/about");
        assert!(host.back());
        assert!(!host.back());
        assert_eq!(host.location(), "/");

        assert!(host.forward());
        assert_eq!(host.location(), "/about");
    }

    #[test]
    fn push_drops_forward_entries() {
        let host = MemoryHost::new("/");
        host.push_state("/a");
        host.push_state("/b");
        host.back();
        host.push_state("/c");
        assert_eq!(host.entries(), vec!["/", "/a", "/c"]);
        assert!(!host.forward());
    }

    #[test]
    fn popstate_listeners_fire_on_move_only() {
        let host = MemoryHost::new("/");
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        host.on_popstate(Arc::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        }));

        assert!(!host.back());
        host.push_state("/a");
        assert!(host.back());
        assert!(host.forward());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn nav_links_toggle() {
        let host = MemoryHost::new("/").with_nav_links(["/", "/about"]);
        host.set_nav_active(1, true);
        host.set_nav_active(7, true);
        assert_eq!(host.active_links(), vec!["/about"]);
        assert_eq!(
            host.nav_hrefs(),
            vec![Some("/".to_string()), Some("/about".to_string())]
        );
    }
}
