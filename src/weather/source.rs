//! # Weather and geolocation collaborators.
//!
//! The application talks to the outside world only through these traits:
//! - [`WeatherSource`] - city name → [`WeatherData`] or a human-readable error
//! - [`Geolocator`] - current position → city name or a [`GeoError`]
//!
//! [`StaticWeather`] and [`StaticLocation`] are in-memory implementations for
//! demos and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{GeoError, WeatherError};
use crate::weather::WeatherData;

/// Looks up current weather by city name.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use skycast::{WeatherData, WeatherError, WeatherSource};
///
/// struct AlwaysSunny;
///
/// #[async_trait]
/// impl WeatherSource for AlwaysSunny {
///     async fn fetch_weather(&self, _city: &str) -> Result<WeatherData, WeatherError> {
///         Ok(WeatherData::new(25.0, 40.0, 26.0, "clear sky"))
///     }
/// }
/// ```
#[async_trait]
pub trait WeatherSource: Send + Sync + 'static {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherData, WeatherError>;
}

/// Resolves the user's current position to a city name.
#[async_trait]
pub trait Geolocator: Send + Sync + 'static {
    async fn locate(&self) -> Result<String, GeoError>;
}

/// Fixed table of cities; unknown cities answer like the provider does.
#[derive(Default)]
pub struct StaticWeather {
    cities: Mutex<HashMap<String, WeatherData>>,
    calls: Mutex<Vec<String>>,
}

impl StaticWeather {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a city.
    #[must_use]
    pub fn with_city(self, city: impl Into<String>, data: WeatherData) -> Self {
        self.cities.lock().insert(city.into(), data);
        self
    }

    /// Cities requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl WeatherSource for StaticWeather {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherData, WeatherError> {
        self.calls.lock().push(city.to_string());
        self.cities
            .lock()
            .get(city)
            .cloned()
            .ok_or_else(|| WeatherError::Provider {
                code: "404".to_string(),
                message: "city not found".to_string(),
            })
    }
}

/// Geolocator with a fixed answer.
pub struct StaticLocation {
    answer: Result<String, GeoError>,
}

impl StaticLocation {
    pub fn city(name: impl Into<String>) -> Self {
        Self {
            answer: Ok(name.into()),
        }
    }

    pub fn failing(reason: GeoError) -> Self {
        Self {
            answer: Err(reason),
        }
    }
}

#[async_trait]
impl Geolocator for StaticLocation {
    async fn locate(&self) -> Result<String, GeoError> {
        self.answer.clone()
    }
}
