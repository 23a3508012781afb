use std::sync::Arc;

use crate::{
    config::Config,
    error::GeoError,
    events::Payload,
    host::{Host, MemoryHost},
    storage::{MemoryStorage, Storage},
    subscribers::Subscribe,
    weather::{Geolocator, StaticLocation, StaticWeather, WeatherSource},
};

use super::App;

/// Builder for wiring an [`App`] to its collaborators.
///
/// Anything not supplied falls back to an in-memory stand-in:
/// a [`MemoryHost`] at the home path, [`MemoryStorage`], a [`StaticWeather`]
/// with no cities, and a geolocator that reports [`GeoError::Unsupported`].
pub struct AppBuilder {
    cfg: Config,
    host: Option<Arc<dyn Host>>,
    storage: Option<Arc<dyn Storage>>,
    weather: Option<Arc<dyn WeatherSource>>,
    geolocator: Option<Arc<dyn Geolocator>>,
    subscribers: Vec<Arc<dyn Subscribe<Payload>>>,
}

impl AppBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            host: None,
            storage: None,
            weather: None,
            geolocator: None,
            subscribers: Vec::new(),
        }
    }

    pub fn with_host(mut self, host: Arc<dyn Host>) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the key-value store backing the search history.
    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_weather(mut self, weather: Arc<dyn WeatherSource>) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn with_geolocator(mut self, geolocator: Arc<dyn Geolocator>) -> Self {
        self.geolocator = Some(geolocator);
        self
    }

    /// Adds extra bus subscribers (e.g. `LogWriter`).
    ///
    /// They are attached after the built-in history recorder and view.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe<Payload>>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Builds the application. Nothing is dispatched until [`App::init`].
    pub fn build(self) -> Arc<App> {
        let host = self
            .host
            .unwrap_or_else(|| Arc::new(MemoryHost::new(self.cfg.home_path.clone())));
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryStorage::new()));
        let weather = self
            .weather
            .unwrap_or_else(|| Arc::new(StaticWeather::new()));
        let geolocator = self
            .geolocator
            .unwrap_or_else(|| Arc::new(StaticLocation::failing(GeoError::Unsupported)));

        Arc::new(App::new_internal(
            self.cfg,
            host,
            storage,
            weather,
            geolocator,
            self.subscribers,
        ))
    }
}
