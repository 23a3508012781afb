//! Application wiring: builder, routes and search actions.
//!
//! - [`AppBuilder`] - collects collaborators, falls back to in-memory ones
//! - [`App`] - registers routes and subscribers, runs searches

mod application;
mod builder;

pub use application::{App, ABOUT_ROUTE, CITY_ROUTE};
pub use builder::AppBuilder;
