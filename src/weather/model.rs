//! # Weather data model.
//!
//! [`WeatherData`] mirrors the subset of the provider's "current weather" body the
//! application reads. [`parse_weather`] turns a raw body into either data or a
//! [`WeatherError`], recognizing the provider's error shape:
//!
//! ```text
//! {"cod":"404","message":"city not found"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WeatherError;

/// Temperatures and humidity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub humidity: f64,
    pub feels_like: f64,
}

/// One weather condition ("light rain", "clear sky", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// Current weather for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Provider status code; a number or a string depending on the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cod: Option<Value>,
}

impl WeatherData {
    /// Builds data with the fields every view needs.
    pub fn new(temp: f64, humidity: f64, feels_like: f64, description: impl Into<String>) -> Self {
        Self {
            main: MainReadings {
                temp,
                humidity,
                feels_like,
            },
            weather: vec![Condition {
                description: description.into(),
            }],
            wind: None,
            name: None,
            cod: None,
        }
    }

    #[must_use]
    pub fn with_wind(mut self, speed: f64) -> Self {
        self.wind = Some(Wind { speed });
        self
    }

    /// Temperature rounded to whole degrees.
    pub fn temp_rounded(&self) -> i64 {
        self.main.temp.round() as i64
    }

    pub fn feels_like_rounded(&self) -> i64 {
        self.main.feels_like.round() as i64
    }

    /// First condition description, if the provider sent any.
    pub fn description(&self) -> Option<&str> {
        self.weather.first().map(|c| c.description.as_str())
    }

    /// Wind speed in m/s; `0` when absent.
    pub fn wind_speed(&self) -> f64 {
        self.wind.as_ref().map_or(0.0, |w| w.speed)
    }
}

/// Decodes a provider response body.
///
/// A body whose `cod` is not 200 and which carries a `message` is reported as
/// [`WeatherError::Provider`]; anything that does not fit [`WeatherData`] is
/// [`WeatherError::Decode`].
///
/// ```
/// use skycast::{parse_weather, WeatherError};
///
/// let err = parse_weather(r#"{"cod":"404","message":"city not found"}"#).unwrap_err();
/// assert!(matches!(err, WeatherError::Provider { .. }));
/// ```
pub fn parse_weather(body: &str) -> Result<WeatherData, WeatherError> {
    let value: Value = serde_json::from_str(body)?;

    let code = value.get("cod").map(code_text);
    if let (Some(code), Some(message)) = (code, value.get("message").and_then(Value::as_str)) {
        if code != "200" {
            return Err(WeatherError::Provider {
                code,
                message: message.to_string(),
            });
        }
    }

    Ok(serde_json::from_value(value)?)
}

fn code_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
