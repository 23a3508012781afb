//! # App: routes, bus, view and search actions wired together.
//!
//! ```text
//! search_city("Berlin") ─► loading(true) ─► WeatherSource ─► weather:loaded ─► go(/city/Berlin)
//!                                                  └─ Err ─► error                    │
//!                       ─► loading(false)                                             ▼
//!                                                                   Router ─► city handler
//!
//! Bus subscribers (in attach order):
//!   HistoryRecorder   weather:loaded → SearchHistory::add
//!   View              loading / error / weather:loaded
//!   extra             whatever the builder was given
//! ```
//!
//! ## Routes
//! - `/`               → home screen
//! - `/city/:cityName` → fetch, show card, announce `weather:loaded`;
//!                       on failure go home and report the error
//! - `/about`          → about screen
//!
//! ## Rules
//! - The history recorder is attached before the view, so a refreshed history
//!   list already contains the city that triggered it.
//! - A city handler whose navigation was superseded drops its result.
//! - A search that finishes after the user navigated elsewhere does not navigate.
//! - `loading(false)` follows every `loading(true)`, success or not.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{
    config::Config,
    error::WeatherError,
    events::{EventBus, Payload, ERROR, LOADING, WEATHER_LOADED},
    host::Host,
    routing::{Dispatch, HandlerFn, RouteContext, Router},
    storage::{HistoryRecorder, SearchHistory, Storage},
    subscribers::Subscribe,
    view::View,
    weather::{Geolocator, WeatherSource},
};

use super::AppBuilder;

/// Route pattern for the weather card.
pub const CITY_ROUTE: &str = "/city/:cityName";
/// Route pattern for the about screen.
pub const ABOUT_ROUTE: &str = "/about";

/// The weather application.
pub struct App {
    cfg: Config,
    host: Arc<dyn Host>,
    storage: Arc<dyn Storage>,
    bus: Arc<EventBus<Payload>>,
    router: Arc<Router>,
    view: Arc<View>,
    history: Arc<SearchHistory>,
    weather: Arc<dyn WeatherSource>,
    geolocator: Arc<dyn Geolocator>,
    extra: Vec<Arc<dyn Subscribe<Payload>>>,
    initialized: AtomicBool,
}

impl App {
    /// Starts building an app with `cfg`.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use skycast::{App, Config, Host, MemoryHost, StaticWeather, WeatherData};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let host = Arc::new(MemoryHost::new("/"));
    /// let weather = StaticWeather::new().with_city("Oslo", WeatherData::new(3.0, 80.0, 1.0, "rain"));
    /// let app = App::builder(Config::default())
    ///     .with_host(host.clone())
    ///     .with_weather(Arc::new(weather))
    ///     .build();
    /// app.init();
    ///
    /// let city = app.search_city("Oslo").await.unwrap().unwrap();
    /// city.finished().await;
    /// assert_eq!(host.location(), "/city/Oslo");
    /// # }
    /// ```
    pub fn builder(cfg: Config) -> AppBuilder {
        AppBuilder::new(cfg)
    }

    pub(super) fn new_internal(
        cfg: Config,
        host: Arc<dyn Host>,
        storage: Arc<dyn Storage>,
        weather: Arc<dyn WeatherSource>,
        geolocator: Arc<dyn Geolocator>,
        extra: Vec<Arc<dyn Subscribe<Payload>>>,
    ) -> Self {
        let history = Arc::new(SearchHistory::new(Arc::clone(&storage), &cfg));
        let view = Arc::new(View::new(Arc::clone(&history), &cfg));
        let router = Router::new(Arc::clone(&host), &cfg);
        Self {
            cfg,
            host,
            storage,
            bus: Arc::new(EventBus::new()),
            router,
            view,
            history,
            weather,
            geolocator,
            extra,
            initialized: AtomicBool::new(false),
        }
    }

    /// Registers routes and subscribers, hooks the host, and dispatches the
    /// starting location. Only the first call has any effect.
    pub fn init(self: &Arc<Self>) -> Option<Dispatch> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::warn!("app already initialized");
            return None;
        }

        let weak = Arc::downgrade(self);
        self.router.add_route(
            self.cfg.home_path.clone(),
            HandlerFn::arc(move |_ctx: RouteContext| {
                if let Some(app) = weak.upgrade() {
                    app.view.render_home();
                }
                async {}
            }),
        );

        let weak = Arc::downgrade(self);
        self.router.add_route(
            CITY_ROUTE,
            HandlerFn::arc(move |ctx: RouteContext| {
                let weak = weak.clone();
                async move {
                    if let Some(app) = weak.upgrade() {
                        app.show_city(ctx).await;
                    }
                }
            }),
        );

        let weak = Arc::downgrade(self);
        self.router.add_route(
            ABOUT_ROUTE,
            HandlerFn::arc(move |_ctx: RouteContext| {
                if let Some(app) = weak.upgrade() {
                    app.view.render_about();
                }
                async {}
            }),
        );

        self.bus
            .subscribe(Arc::new(HistoryRecorder::new(Arc::clone(&self.history))));
        self.bus.subscribe(self.view.clone());
        for sub in &self.extra {
            self.bus.subscribe(Arc::clone(sub));
        }

        self.router.init()
    }

    /// Looks up `input` and, on success, navigates to its weather card.
    ///
    /// Failures are announced on the bus as `error` and also returned.
    pub async fn search_city(&self, input: &str) -> Result<Option<Dispatch>, WeatherError> {
        let city = input.trim();
        if city.is_empty() {
            self.report(&WeatherError::EmptyCity);
            return Err(WeatherError::EmptyCity);
        }

        self.bus.emit(LOADING, Payload::loading(true));
        let result = self.fetch_and_open(city).await;
        self.bus.emit(LOADING, Payload::loading(false));
        result
    }

    /// Resolves the current position to a city, then behaves like [`search_city`](Self::search_city).
    ///
    /// A resolved position is remembered under [`Config::geo_permission_key`].
    pub async fn search_geo(&self) -> Result<Option<Dispatch>, WeatherError> {
        self.bus.emit(LOADING, Payload::loading(true));
        let result = match self.geolocator.locate().await {
            Ok(city) => {
                if let Err(e) = self
                    .storage
                    .set_item(&self.cfg.geo_permission_key, "granted")
                {
                    tracing::warn!(error = %e, label = e.as_label(), "geolocation permission not saved");
                }
                self.fetch_and_open(&city).await
            }
            Err(e) => {
                let e = WeatherError::from(e);
                self.report(&e);
                Err(e)
            }
        };
        self.bus.emit(LOADING, Payload::loading(false));
        result
    }

    /// Steps back in host history; the router re-navigates through popstate.
    pub fn back(&self) -> bool {
        self.host.history_back()
    }

    pub fn bus(&self) -> &Arc<EventBus<Payload>> {
        &self.bus
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    pub fn view(&self) -> &Arc<View> {
        &self.view
    }

    pub fn history(&self) -> &Arc<SearchHistory> {
        &self.history
    }

    /// Fetches `city`, announces it, and opens its card unless the user
    /// navigated elsewhere while the lookup was running.
    async fn fetch_and_open(&self, city: &str) -> Result<Option<Dispatch>, WeatherError> {
        let started_at = self.router.current().map(|c| c.seq);
        match self.weather.fetch_weather(city).await {
            Ok(weather) => {
                self.bus
                    .emit(WEATHER_LOADED, Payload::weather_loaded(city, weather));
                if self.router.current().map(|c| c.seq) != started_at {
                    tracing::debug!(city, "navigation changed during search; staying put");
                    return Ok(None);
                }
                let path = format!("/city/{}", urlencoding::encode(city));
                Ok(self.router.go(&path))
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    async fn show_city(&self, ctx: RouteContext) {
        let city = ctx.param("cityName").unwrap_or_default().to_string();

        self.bus.emit(LOADING, Payload::loading(true));
        let result = self.weather.fetch_weather(&city).await;

        if !ctx.is_current() {
            tracing::debug!(seq = ctx.seq, city = %city, "navigation superseded; dropping result");
        } else {
            match result {
                Ok(weather) => {
                    self.view.render_city(&city, weather.clone());
                    self.bus
                        .emit(WEATHER_LOADED, Payload::weather_loaded(city, weather));
                }
                Err(e) => {
                    // Home first so the message lands on its error line.
                    self.router.go(&self.cfg.home_path);
                    self.report(&e);
                }
            }
        }
        self.bus.emit(LOADING, Payload::loading(false));
    }

    fn report(&self, e: &WeatherError) {
        tracing::warn!(error = %e, label = e.as_label(), "weather request failed");
        self.bus.emit(ERROR, Payload::error(e.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoError;
    use crate::host::{ClickEvent, Element, MemoryHost};
    use crate::storage::MemoryStorage;
    use crate::view::Screen;
    use crate::weather::{StaticLocation, StaticWeather, WeatherData};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    type Seen = Arc<Mutex<Vec<(String, Payload)>>>;

    /// Weather source whose lookups for selected cities wait for a release signal.
    struct Gated {
        inner: StaticWeather,
        gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    }

    impl Gated {
        fn new(inner: StaticWeather) -> Self {
            Self {
                inner,
                gates: Mutex::new(HashMap::new()),
            }
        }

        fn hold(&self, city: &str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().insert(city.to_string(), rx);
            tx
        }
    }

    #[async_trait]
    impl WeatherSource for Gated {
        async fn fetch_weather(&self, city: &str) -> Result<WeatherData, WeatherError> {
            let gate = self.gates.lock().remove(city);
            if let Some(rx) = gate {
                let _ = rx.await;
            }
            self.inner.fetch_weather(city).await
        }
    }

    fn record_events(app: &App) -> Seen {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        for event in [LOADING, ERROR, WEATHER_LOADED] {
            let seen = Arc::clone(&seen);
            app.bus().on(
                event,
                crate::events::callback(move |p: &Payload| {
                    seen.lock().push((event.to_string(), p.clone()));
                }),
            );
        }
        seen
    }

    fn loaded_cities(seen: &Seen) -> Vec<String> {
        seen.lock()
            .iter()
            .filter_map(|(_, p)| p.as_weather().map(|w| w.city.clone()))
            .collect()
    }

    fn gated_app(start: &str) -> (Arc<App>, Arc<MemoryHost>, Arc<Gated>, Seen) {
        let host = Arc::new(MemoryHost::new(start).with_nav_links(["/", "/about"]));
        let weather = Arc::new(Gated::new(
            StaticWeather::new()
                .with_city("A", WeatherData::new(1.0, 10.0, 0.0, "fog"))
                .with_city("B", WeatherData::new(2.0, 20.0, 1.0, "rain")),
        ));
        let app = App::builder(Config::default())
            .with_host(host.clone())
            .with_weather(weather.clone())
            .build();
        let seen = record_events(&app);
        (app, host, weather, seen)
    }

    struct Harness {
        app: Arc<App>,
        host: Arc<MemoryHost>,
        weather: Arc<StaticWeather>,
        seen: Seen,
    }

    fn harness(start: &str) -> Harness {
        let host = Arc::new(MemoryHost::new(start).with_nav_links(["/", "/about"]));
        let weather = Arc::new(
            StaticWeather::new()
                .with_city("Berlin", WeatherData::new(14.6, 40.0, 13.2, "clear sky"))
                .with_city("New York", WeatherData::new(20.0, 60.0, 21.0, "haze")),
        );
        let app = App::builder(Config::default())
            .with_host(host.clone())
            .with_storage(Arc::new(MemoryStorage::new()))
            .with_weather(weather.clone())
            .with_geolocator(Arc::new(StaticLocation::city("Berlin")))
            .build();

        let seen = record_events(&app);
        Harness {
            app,
            host,
            weather,
            seen,
        }
    }

    fn names(seen: &Seen) -> Vec<String> {
        seen.lock().iter().map(|(n, _)| n.clone()).collect()
    }

    #[tokio::test]
    async fn search_navigates_and_records_history() {
        let h = harness("/");
        h.app.init();
        assert!(matches!(h.app.view().snapshot().screen, Screen::Home { .. }));

        let dispatch = h.app.search_city("  Berlin ").await.unwrap().unwrap();
        assert_eq!(dispatch.pattern(), CITY_ROUTE);
        assert!(dispatch.finished().await);

        assert_eq!(h.host.location(), "/city/Berlin");
        assert_eq!(h.weather.calls(), vec!["Berlin", "Berlin"]);
        assert_eq!(h.app.history().get().unwrap(), vec!["Berlin"]);

        assert_eq!(loaded_cities(&h.seen), vec!["Berlin", "Berlin"]);

        match h.app.view().snapshot().screen {
            Screen::City { city, weather } => {
                assert_eq!(city, "Berlin");
                assert_eq!(weather.temp_rounded(), 15);
            }
            other => panic!("unexpected screen: {other:?}"),
        }
        assert_eq!(h.host.active_links(), Vec::<String>::new());
    }

    #[tokio::test]
    async fn city_names_are_encoded_in_the_path() {
        let h = harness("/");
        h.app.init();
        let dispatch = h.app.search_city("New York").await.unwrap().unwrap();
        dispatch.finished().await;
        assert_eq!(h.host.location(), "/city/New%20York");
        assert_eq!(h.app.router().current_params()["cityName"], "New York");
    }

    #[tokio::test]
    async fn empty_input_reports_error_without_fetching() {
        let h = harness("/");
        h.app.init();
        let err = h.app.search_city("   ").await.unwrap_err();
        assert_eq!(err, WeatherError::EmptyCity);
        assert!(h.weather.calls().is_empty());
        assert_eq!(names(&h.seen), vec![ERROR]);
        assert_eq!(
            h.app.view().snapshot().error.as_deref(),
            Some("Enter a city name")
        );
    }

    #[tokio::test]
    async fn unknown_city_reports_and_stays_home() {
        let h = harness("/");
        h.app.init();
        let err = h.app.search_city("Atlantis").await.unwrap_err();
        assert_eq!(err.to_string(), "city not found");
        assert_eq!(names(&h.seen), vec![LOADING, ERROR, LOADING]);
        assert_eq!(h.host.location(), "/");
        assert!(h.app.history().get().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failing_city_route_goes_home() {
        let h = harness("/city/Atlantis");
        let dispatch = h.app.init().unwrap();
        dispatch.finished().await;

        assert_eq!(h.host.location(), "/");
        assert_eq!(h.host.entries(), vec!["/city/Atlantis", "/"]);
        let state = h.app.view().snapshot();
        assert!(matches!(state.screen, Screen::Home { .. }));
        assert_eq!(state.error.as_deref(), Some("city not found"));
        assert_eq!(names(&h.seen), vec![LOADING, ERROR, LOADING]);
    }

    #[tokio::test]
    async fn geo_search_uses_located_city() {
        let h = harness("/");
        h.app.init();
        let dispatch = h.app.search_geo().await.unwrap().unwrap();
        dispatch.finished().await;
        assert_eq!(h.host.location(), "/city/Berlin");
    }

    #[tokio::test]
    async fn geo_failure_is_reported() {
        let host = Arc::new(MemoryHost::new("/"));
        let app = App::builder(Config::default())
            .with_host(host.clone())
            .with_geolocator(Arc::new(StaticLocation::failing(GeoError::PermissionDenied)))
            .build();
        app.init();
        let err = app.search_geo().await.unwrap_err();
        assert_eq!(err, WeatherError::Geolocation(GeoError::PermissionDenied));
        assert_eq!(
            app.view().snapshot().error,
            Some(GeoError::PermissionDenied.to_string())
        );
        assert!(!app.view().snapshot().loading);
    }

    #[tokio::test]
    async fn back_returns_to_previous_screen() {
        let h = harness("/");
        h.app.init();
        h.app.search_city("Berlin").await.unwrap().unwrap().finished().await;

        assert!(h.app.back());
        assert_eq!(h.host.location(), "/");
        assert!(matches!(h.app.view().snapshot().screen, Screen::Home { .. }));
        assert!(!h.app.back());
    }

    #[tokio::test]
    async fn home_lists_searches_after_returning() {
        let h = harness("/");
        h.app.init();
        h.app.search_city("Berlin").await.unwrap().unwrap().finished().await;
        h.app.back();
        assert_eq!(
            h.app.view().snapshot().screen,
            Screen::Home {
                history: vec!["Berlin".into()]
            }
        );
    }

    #[tokio::test]
    async fn nav_click_opens_about() {
        let h = harness("/");
        h.app.init();
        let link = Element::anchor("/about").with_attr("data-router", "");
        assert!(h.host.click(&ClickEvent::new(Element::new("span")).within(link)));
        assert_eq!(h.app.view().snapshot().screen, Screen::About);
        assert_eq!(h.host.active_links(), vec!["/about"]);
    }

    #[tokio::test]
    async fn second_init_is_ignored() {
        let h = harness("/");
        assert!(h.app.init().is_some());
        assert!(h.app.init().is_none());
        assert_eq!(h.app.router().patterns().len(), 3);
        assert_eq!(h.app.bus().subscriber_count(WEATHER_LOADED), 3);
    }

    #[tokio::test]
    async fn superseded_city_navigation_drops_its_result() {
        let (app, host, weather, seen) = gated_app("/");
        app.init();
        let release_a = weather.hold("A");

        let slow = app.router().go("/city/A").unwrap();
        tokio::task::yield_now().await;
        let fast = app.router().go("/city/B").unwrap();
        assert!(fast.finished().await);

        release_a.send(()).unwrap();
        assert!(slow.finished().await);

        assert_eq!(host.location(), "/city/B");
        assert_eq!(loaded_cities(&seen), vec!["B"]);
        assert_eq!(app.history().get().unwrap(), vec!["B"]);
        match app.view().snapshot().screen {
            Screen::City { city, .. } => assert_eq!(city, "B"),
            other => panic!("unexpected screen: {other:?}"),
        }

        let loading: Vec<bool> = seen
            .lock()
            .iter()
            .filter_map(|(_, p)| p.as_loading())
            .collect();
        assert_eq!(loading.iter().filter(|on| !**on).count(), 2);
        assert_eq!(loading.last(), Some(&false));
    }

    #[tokio::test]
    async fn slow_search_does_not_pull_user_away() {
        let (app, host, weather, seen) = gated_app("/");
        app.init();
        let release = weather.hold("A");

        let searching = Arc::clone(&app);
        let search = tokio::spawn(async move { searching.search_city("A").await });
        tokio::task::yield_now().await;

        app.router().go("/about");
        release.send(()).unwrap();

        let outcome = search.await.unwrap().unwrap();
        assert!(outcome.is_none());
        assert_eq!(host.location(), "/about");
        assert_eq!(app.view().snapshot().screen, Screen::About);
        assert_eq!(loaded_cities(&seen), vec!["A"]);
    }

    #[tokio::test]
    async fn geo_search_remembers_permission() {
        let storage = Arc::new(MemoryStorage::new());
        let app = App::builder(Config::default())
            .with_storage(storage.clone())
            .with_weather(Arc::new(
                StaticWeather::new().with_city("Riga", WeatherData::new(5.0, 70.0, 3.0, "mist")),
            ))
            .with_geolocator(Arc::new(StaticLocation::city("Riga")))
            .build();
        app.init();

        app.search_geo().await.unwrap().unwrap().finished().await;
        assert_eq!(
            storage.get_item("geoPermission").unwrap().as_deref(),
            Some("granted")
        );
    }

    #[tokio::test]
    async fn failed_geolocation_leaves_permission_unset() {
        let storage = Arc::new(MemoryStorage::new());
        let app = App::builder(Config::default())
            .with_storage(storage.clone())
            .with_geolocator(Arc::new(StaticLocation::failing(GeoError::PermissionDenied)))
            .build();
        app.init();

        assert!(app.search_geo().await.is_err());
        assert_eq!(storage.get_item("geoPermission").unwrap(), None);
    }
}
