//! # LogWriter - application event logger
//!
//! A minimal subscriber that writes incoming application events through `tracing`.
//! Use it for debugging or demos.
//!
//! ## Example output
//! ```text
//! INFO skycast: [loading] on=true
//! INFO skycast: [weather-loaded] city="Berlin" temp=15 description="clear sky"
//! INFO skycast: [error] message="city not found"
//! ```

use crate::events::{Payload, ERROR, LOADING, WEATHER_LOADED};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Subscribe<Payload> for LogWriter {
    fn on_event(&self, event: &str, payload: &Payload) {
        match payload {
            Payload::Loading(on) => {
                tracing::info!(target: "skycast", "[loading] on={on}");
            }
            Payload::Error(report) => {
                tracing::info!(target: "skycast", "[error] message={:?}", report.message);
            }
            Payload::WeatherLoaded(loaded) => {
                tracing::info!(
                    target: "skycast",
                    "[weather-loaded] city={:?} temp={} description={:?}",
                    loaded.city,
                    loaded.weather.temp_rounded(),
                    loaded.weather.description().unwrap_or("")
                );
            }
            Payload::Empty => {
                tracing::info!(target: "skycast", "[{event}]");
            }
        }
    }

    fn events(&self) -> &[&'static str] {
        &[LOADING, ERROR, WEATHER_LOADED]
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
