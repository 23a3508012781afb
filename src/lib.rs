//! # skycast
//!
//! **Skycast** is the core of a single-page weather client: a path router with
//! parameterized routes, a named-event bus, and the screens and search actions
//! built on them.
//!
//! The browser is abstracted behind [`Host`]; weather and geolocation lookups
//! behind [`WeatherSource`] and [`Geolocator`]; persistence behind [`Storage`].
//! In-memory implementations of all four ship with the crate.
//!
//! ## Architecture
//! ```text
//!        Host (location, history, clicks, nav links)
//!          │ popstate / click            ▲ push_state / set_nav_active
//!          ▼                             │
//! ┌──────────────────────────────────────┴──────────────────────────┐
//! │  Router                                                         │
//! │  - ordered routes, first match wins                             │
//! │  - `:name` segments captured and percent-decoded                │
//! │  - unmatched paths fall back to home once                       │
//! │  - each dispatch gets a sequence number and cancellation token  │
//! └───────┬──────────────────┬──────────────────────┬───────────────┘
//!         ▼                  ▼                      ▼
//!      "/" home       "/city/:cityName"          "/about"
//!                            │ WeatherSource
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  EventBus<Payload>   loading │ error │ weather:loaded           │
//! └───────┬──────────────────┬──────────────────────┬───────────────┘
//!         ▼                  ▼                      ▼
//!  HistoryRecorder          View                LogWriter
//!  (SearchHistory)   (screen, loading,      (feature `logging`)
//!                     error line, alerts)
//! ```
//!
//! ## Features
//! | Area            | Description                                               | Key types                              |
//! |-----------------|-----------------------------------------------------------|----------------------------------------|
//! | **Routing**     | Pattern matching, dispatch, fallback, history hooks.      | [`Router`], [`match_route`]            |
//! | **Events**      | Synchronous, ordered, panic-isolated publish/subscribe.   | [`EventBus`], [`Subscribe`]            |
//! | **Weather**     | Provider body model and lookup seams.                     | [`WeatherData`], [`WeatherSource`]     |
//! | **Storage**     | Bounded, de-duplicated search history.                    | [`SearchHistory`], [`FileStorage`]     |
//! | **View**        | Screen state driven by events.                            | [`View`], [`Screen`]                   |
//! | **Errors**      | Typed errors with stable labels.                          | [`RouteError`], [`WeatherError`]       |
//! | **Configuration** | Home path, markers, history limit, error display time. | [`Config`]                             |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogWriter`] subscriber that reports events through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use skycast::{App, Config, MemoryHost, Screen, StaticWeather, WeatherData};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let host = Arc::new(MemoryHost::new("/").with_nav_links(["/", "/about"]));
//!     let weather = StaticWeather::new()
//!         .with_city("Berlin", WeatherData::new(14.6, 40.0, 13.2, "clear sky"));
//!
//!     let app = App::builder(Config::default())
//!         .with_host(host.clone())
//!         .with_weather(Arc::new(weather))
//!         .build();
//!     app.init();
//!
//!     if let Ok(Some(dispatch)) = app.search_city("Berlin").await {
//!         dispatch.finished().await;
//!     }
//!     assert!(matches!(app.view().snapshot().screen, Screen::City { .. }));
//!     assert_eq!(app.history().get().unwrap(), vec!["Berlin"]);
//! }
//! ```

mod app;
mod config;
mod error;
mod events;
mod host;
mod routing;
mod storage;
mod subscribers;
mod view;
mod weather;

// ---- Public re-exports ----

pub use app::{App, AppBuilder, ABOUT_ROUTE, CITY_ROUTE};
pub use config::Config;
pub use error::{ErrorReport, GeoError, RouteError, StorageError, WeatherError};
pub use events::{
    callback, Callback, EventBus, Payload, Subscription, WeatherLoaded, ERROR, LOADING,
    WEATHER_LOADED,
};
pub use host::{ClickEvent, ClickListener, Element, Host, MemoryHost, NavLink, PopListener};
pub use routing::{
    decode_segment, match_route, match_route_with, normalize_path, BoxHandlerFuture,
    CurrentRoute, Dispatch, HandlerFn, HandlerRef, Params, RouteContext, RouteHandler, Router,
    PARAM_MARKER,
};
pub use storage::{FileStorage, HistoryRecorder, MemoryStorage, SearchHistory, Storage};
pub use subscribers::Subscribe;
pub use view::{Screen, View, ViewState};
pub use weather::{
    parse_weather, Condition, Geolocator, MainReadings, StaticLocation, StaticWeather,
    WeatherData, WeatherSource, Wind,
};

// Optional: expose a simple built-in logger subscriber (demo/reference).
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
