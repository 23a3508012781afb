//! # Application event names and payloads.
//!
//! Names are plain strings on the bus; these constants are the ones the
//! application produces and its subscribers consume.
//!
//! | Name             | Payload                        |
//! |------------------|--------------------------------|
//! | [`LOADING`]      | [`Payload::Loading`]           |
//! | [`ERROR`]        | [`Payload::Error`]             |
//! | [`WEATHER_LOADED`] | [`Payload::WeatherLoaded`]   |

use crate::error::ErrorReport;
use crate::weather::WeatherData;

/// A fetch started (`true`) or finished (`false`).
pub const LOADING: &str = "loading";
/// Something failed and the user should be told.
pub const ERROR: &str = "error";
/// Weather for a city arrived.
pub const WEATHER_LOADED: &str = "weather:loaded";

/// Payload carried by application events.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No data.
    Empty,
    Loading(bool),
    Error(ErrorReport),
    WeatherLoaded(WeatherLoaded),
}

/// Body of a [`WEATHER_LOADED`] event.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherLoaded {
    pub city: String,
    pub weather: WeatherData,
}

impl Payload {
    #[inline]
    pub fn loading(on: bool) -> Self {
        Payload::Loading(on)
    }

    #[inline]
    pub fn error(report: impl Into<ErrorReport>) -> Self {
        Payload::Error(report.into())
    }

    #[inline]
    pub fn weather_loaded(city: impl Into<String>, weather: WeatherData) -> Self {
        Payload::WeatherLoaded(WeatherLoaded {
            city: city.into(),
            weather,
        })
    }

    pub fn as_loading(&self) -> Option<bool> {
        match self {
            Payload::Loading(on) => Some(*on),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorReport> {
        match self {
            Payload::Error(report) => Some(report),
            _ => None,
        }
    }

    pub fn as_weather(&self) -> Option<&WeatherLoaded> {
        match self {
            Payload::WeatherLoaded(loaded) => Some(loaded),
            _ => None,
        }
    }
}
