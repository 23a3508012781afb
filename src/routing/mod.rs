//! Client-side routing.
//!
//! - [`match_route`], [`normalize_path`] - pure pattern matching
//! - [`RouteHandler`], [`HandlerFn`], [`RouteContext`] - what a route runs
//! - [`Router`] - ordered routes, first-match dispatch, home fallback, history hooks

mod handler;
mod pattern;
mod router;

pub use handler::{BoxHandlerFuture, HandlerFn, HandlerRef, RouteContext, RouteHandler};
pub use pattern::{
    decode_segment, match_route, match_route_with, normalize_path, Params, PARAM_MARKER,
};
pub use router::{CurrentRoute, Dispatch, Router};
