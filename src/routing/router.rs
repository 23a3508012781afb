//! # Router: path matching, dispatch and history integration.
//!
//! The [`Router`] keeps an ordered list of routes and turns a navigation target
//! into exactly one handler invocation.
//!
//! ## Navigation
//! ```text
//! navigate(path?)
//!   ├─ target = path, or Host::location() when omitted/empty
//!   ├─ clean  = normalize(target)
//!   ├─ for route in routes (registration order):
//!   │     match_route(normalize(route.pattern), clean)
//!   │       ├─ Ok(Some(params)) → dispatch, update nav links, return   (first match wins)
//!   │       ├─ Ok(None)         → next route
//!   │       └─ Err(decode)      → warn!, next route
//!   └─ nothing matched:
//!         target != home → navigate(home)   (single fallback; home never recurses)
//!         target == home → no dispatch
//!
//! dispatch
//!   ├─ seq += 1; cancel previous navigation token; new token
//!   ├─ current = { pattern, params, seq }
//!   └─ spawn(handler(ctx)) on the current runtime   (not awaited)
//! ```
//!
//! ## Rules
//! - Routes are never de-duplicated; an earlier equal pattern always wins.
//! - `go(path)` pushes `path` onto the host history and then navigates to it.
//! - `init()` re-navigates on back/forward and routes clicks on `a[data-router]`.
//! - Dispatch spawns on the current Tokio runtime. Without one, the handler future is
//!   polled once in place and dropped if it is still pending.
//! - The home fallback is taken at most once per call, whatever `home_path` is.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::host::{ClickEvent, Host};
use crate::routing::handler::{HandlerRef, RouteContext};
use crate::routing::pattern::{match_route_with, normalize_path, Params};

/// Registered route: pattern plus handler. Immutable after registration.
#[derive(Clone)]
struct Route {
    pattern: Arc<str>,
    handler: HandlerRef,
}

/// Last successfully matched route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentRoute {
    /// Pattern as registered.
    pub pattern: Arc<str>,
    pub params: Params,
    pub seq: u64,
}

/// How the handler future of a dispatch was run.
#[derive(Debug)]
enum Run {
    /// Spawned on the current Tokio runtime.
    Spawned(JoinHandle<()>),
    /// No runtime: polled once in place; `true` if it completed.
    Inline(bool),
}

/// Result of a dispatch: identifies the navigation and lets callers await its handler.
#[derive(Debug)]
pub struct Dispatch {
    seq: u64,
    pattern: Arc<str>,
    run: Run,
}

impl Dispatch {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// `true` when the handler was spawned on a runtime.
    pub fn is_spawned(&self) -> bool {
        matches!(self.run, Run::Spawned(_))
    }

    /// Waits for the handler future; `false` if it panicked, was aborted,
    /// or could not finish without a runtime.
    pub async fn finished(self) -> bool {
        match self.run {
            Run::Spawned(join) => join.await.is_ok(),
            Run::Inline(done) => done,
        }
    }
}

/// Path router bound to a [`Host`].
pub struct Router {
    host: Arc<dyn Host>,
    home: String,
    marker: char,
    link_attr: String,
    routes: RwLock<Vec<Route>>,
    current: RwLock<Option<CurrentRoute>>,
    active: Mutex<CancellationToken>,
    seq: AtomicU64,
}

impl Router {
    /// Creates a router with no routes.
    pub fn new(host: Arc<dyn Host>, cfg: &Config) -> Arc<Self> {
        Arc::new(Self {
            host,
            home: cfg.home_path.clone(),
            marker: cfg.param_marker,
            link_attr: cfg.router_attribute.clone(),
            routes: RwLock::new(Vec::new()),
            current: RwLock::new(None),
            active: Mutex::new(CancellationToken::new()),
            seq: AtomicU64::new(0),
        })
    }

    /// Appends a route. Order matters: the first structural match wins.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use skycast::{Config, HandlerFn, MemoryHost, RouteContext, Router};
    ///
    /// let router = Router::new(Arc::new(MemoryHost::new("/")), &Config::default());
    /// router.add_route("/", HandlerFn::arc(|_ctx: RouteContext| async {}));
    /// router.add_route("/city/:cityName", HandlerFn::arc(|_ctx: RouteContext| async {}));
    /// assert_eq!(router.patterns(), vec!["/", "/city/:cityName"]);
    /// ```
    pub fn add_route(&self, pattern: impl Into<String>, handler: HandlerRef) {
        let pattern: Arc<str> = Arc::from(pattern.into());
        tracing::debug!(pattern = %pattern, "route registered");
        self.routes.write().push(Route { pattern, handler });
    }

    /// Registered patterns, in matching order.
    pub fn patterns(&self) -> Vec<String> {
        self.routes
            .read()
            .iter()
            .map(|r| r.pattern.to_string())
            .collect()
    }

    /// Last matched route, if any.
    pub fn current(&self) -> Option<CurrentRoute> {
        self.current.read().clone()
    }

    /// Parameters of the last matched route (empty before the first match).
    pub fn current_params(&self) -> Params {
        self.current
            .read()
            .as_ref()
            .map(|c| c.params.clone())
            .unwrap_or_default()
    }

    /// Dispatches the first route matching `path` (or the host location).
    ///
    /// Falls back once to the home path when nothing matches. Returns the dispatch,
    /// or `None` when even the home path has no route.
    pub fn navigate(&self, path: Option<&str>) -> Option<Dispatch> {
        self.navigate_inner(path, false)
    }

    fn navigate_inner(&self, path: Option<&str>, is_fallback: bool) -> Option<Dispatch> {
        let target = match path {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => self.host.location(),
        };
        let clean = normalize_path(&target);

        let routes = self.routes.read().clone();
        for route in &routes {
            let pattern = normalize_path(&route.pattern);
            match match_route_with(pattern, clean, self.marker) {
                Ok(Some(params)) => return Some(self.dispatch(route, params, &target)),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        path = %target,
                        pattern = %route.pattern,
                        error = %e,
                        label = e.as_label(),
                        "path segment not decodable; treating route as no match"
                    );
                }
            }
        }

        if !is_fallback && target != self.home {
            tracing::debug!(path = %target, home = %self.home, "no route matched; falling back");
            return self.navigate_inner(Some(&self.home), true);
        }
        tracing::debug!(path = %target, home = %self.home, "no route for home path");
        None
    }

    /// Pushes `path` onto the host history, then navigates to it.
    pub fn go(&self, path: &str) -> Option<Dispatch> {
        self.host.push_state(path);
        self.navigate(Some(path))
    }

    /// Hooks back/forward and link clicks, then dispatches the starting location.
    pub fn init(self: &Arc<Self>) -> Option<Dispatch> {
        let weak = Arc::downgrade(self);
        self.host.on_popstate(Arc::new(move || {
            if let Some(router) = weak.upgrade() {
                router.navigate(None);
            }
        }));

        let weak = Arc::downgrade(self);
        let attr = self.link_attr.clone();
        self.host.on_click(Arc::new(move |ev: &ClickEvent| {
            let Some(link) = ev.closest(|el| el.tag() == "a" && el.has_attr(&attr)) else {
                return false;
            };
            match (link.attr("href"), weak.upgrade()) {
                (Some(href), Some(router)) if !href.is_empty() => {
                    router.go(href);
                }
                _ => {}
            }
            true
        }));

        self.navigate(None)
    }

    /// Marks nav links whose target equals `path` (or the host location) as active.
    pub fn update_active_nav(&self, path: Option<&str>) {
        let current = match path {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => self.host.location(),
        };
        for (index, href) in self.host.nav_hrefs().iter().enumerate() {
            let active = href.as_deref() == Some(current.as_str());
            self.host.set_nav_active(index, active);
        }
    }

    fn dispatch(&self, route: &Route, params: Params, target: &str) -> Dispatch {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let token = CancellationToken::new();
        let previous = std::mem::replace(&mut *self.active.lock(), token.clone());
        previous.cancel();

        *self.current.write() = Some(CurrentRoute {
            pattern: Arc::clone(&route.pattern),
            params: params.clone(),
            seq,
        });
        tracing::debug!(seq, path = %target, pattern = %route.pattern, "dispatching route");

        let fut = route.handler.call(RouteContext {
            params,
            path: target.to_string(),
            seq,
            token,
        });
        let run = match tokio::runtime::Handle::try_current() {
            Ok(rt) => Run::Spawned(rt.spawn(fut)),
            Err(_) => {
                let done = fut.now_or_never().is_some();
                if !done {
                    tracing::warn!(seq, path = %target, "no runtime; handler suspended and was dropped");
                }
                Run::Inline(done)
            }
        };
        self.update_active_nav(Some(target));

        Dispatch {
            seq,
            pattern: Arc::clone(&route.pattern),
            run,
        }
    }
}
