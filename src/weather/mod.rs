//! Weather data and the external collaborators that produce it.
//!
//! - [`WeatherData`], [`parse_weather`] - the provider body the views read
//! - [`WeatherSource`], [`Geolocator`] - async seams to the outside world
//! - [`StaticWeather`], [`StaticLocation`] - in-memory stand-ins

mod model;
mod source;

pub use model::{parse_weather, Condition, MainReadings, WeatherData, Wind};
pub use source::{Geolocator, StaticLocation, StaticWeather, WeatherSource};
