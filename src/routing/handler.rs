//! # Route handlers.
//!
//! A [`RouteHandler`] turns a matched navigation into a future. The router spawns
//! that future and moves on; it never waits for it.
//!
//! [`HandlerFn`] wraps a closure `F: Fn(RouteContext) -> Fut`, producing a fresh
//! future per navigation. Work placed before the `async` block runs synchronously
//! inside `navigate`; everything in the block runs on the runtime.
//!
//! ## Stale results
//! Each navigation gets its own [`CancellationToken`]. Starting the next navigation
//! cancels it, so a slow handler can check [`RouteContext::is_current`] before
//! publishing results.
//!
//! ## Example
//! ```rust
//! use skycast::{HandlerFn, HandlerRef, RouteContext};
//!
//! let h: HandlerRef = HandlerFn::arc(|ctx: RouteContext| async move {
//!     let city = ctx.param("cityName").unwrap_or_default().to_string();
//!     // fetch weather for `city`...
//!     if ctx.is_current() {
//!         // publish results
//!     }
//! });
//! # let _ = h;
//! ```

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::routing::Params;

/// Boxed future returned by a handler.
pub type BoxHandlerFuture = BoxFuture<'static, ()>;

/// Shared handle to a handler.
pub type HandlerRef = Arc<dyn RouteHandler>;

/// What a handler learns about the navigation that selected it.
#[derive(Debug, Clone)]
pub struct RouteContext {
    /// Decoded parameters bound by the pattern.
    pub params: Params,
    /// Navigation target as requested (not normalized).
    pub path: String,
    /// Navigation sequence number, increasing per dispatch.
    pub seq: u64,
    /// Cancelled once a newer navigation is dispatched.
    pub token: CancellationToken,
}

impl RouteContext {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// `false` once a newer navigation has been dispatched.
    #[inline]
    pub fn is_current(&self) -> bool {
        !self.token.is_cancelled()
    }
}

/// Handler invoked for a matched route.
pub trait RouteHandler: Send + Sync + 'static {
    fn call(&self, ctx: RouteContext) -> BoxHandlerFuture;
}

/// Function-backed handler.
pub struct HandlerFn<F> {
    f: F,
}

impl<F> HandlerFn<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

impl<F, Fut> RouteHandler for HandlerFn<F>
where
    F: Fn(RouteContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    fn call(&self, ctx: RouteContext) -> BoxHandlerFuture {
        Box::pin((self.f)(ctx))
    }
}
