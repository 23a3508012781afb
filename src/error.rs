//! Error types used by the router, the weather collaborators and persistence.
//!
//! - [`RouteError`] - a path segment could not be percent-decoded.
//! - [`GeoError`] - geolocation or reverse geocoding failed.
//! - [`WeatherError`] - a weather lookup failed.
//! - [`StorageError`] - the search history could not be read or written.
//!
//! All enums provide `as_label` for logs; [`ErrorReport`] is the form an error
//! takes when it travels over the event bus.

use std::fmt;
use thiserror::Error;

/// # Errors produced while matching a path against a route pattern.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A `%` was not followed by two hexadecimal digits.
    #[error("malformed percent escape in segment {segment:?}")]
    MalformedEscape {
        /// The raw path segment.
        segment: String,
    },

    /// The escapes decoded to bytes that are not valid UTF-8.
    #[error("segment {segment:?} does not decode to UTF-8")]
    InvalidUtf8 {
        /// The raw path segment.
        segment: String,
    },
}

impl RouteError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use skycast::RouteError;
    ///
    /// let err = RouteError::MalformedEscape { segment: "%zz".into() };
    /// assert_eq!(err.as_label(), "route_malformed_escape");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RouteError::MalformedEscape { .. } => "route_malformed_escape",
            RouteError::InvalidUtf8 { .. } => "route_invalid_utf8",
        }
    }
}

/// # Reasons a geolocation lookup can fail.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoError {
    #[error("User denied the request for Geolocation.")]
    PermissionDenied,
    #[error("Location information is unavailable.")]
    PositionUnavailable,
    #[error("The request to get user location timed out.")]
    Timeout,
    #[error("Geolocation is not supported.")]
    Unsupported,
    #[error("An unknown error occurred")]
    Unknown,
    /// Reverse geocoding returned no city for the position.
    #[error("City not found for this location")]
    CityNotFound,
    /// Reverse geocoding request itself failed.
    #[error("Failed to get a City name")]
    ReverseGeocode,
}

impl GeoError {
    /// Maps a host geolocation error code (1, 2, 3) to a reason.
    ///
    /// ```
    /// use skycast::GeoError;
    ///
    /// assert_eq!(GeoError::from_code(1), GeoError::PermissionDenied);
    /// assert_eq!(GeoError::from_code(42), GeoError::Unknown);
    /// ```
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeoError::PermissionDenied,
            2 => GeoError::PositionUnavailable,
            3 => GeoError::Timeout,
            _ => GeoError::Unknown,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            GeoError::PermissionDenied => "geo_permission_denied",
            GeoError::PositionUnavailable => "geo_position_unavailable",
            GeoError::Timeout => "geo_timeout",
            GeoError::Unsupported => "geo_unsupported",
            GeoError::Unknown => "geo_unknown",
            GeoError::CityNotFound => "geo_city_not_found",
            GeoError::ReverseGeocode => "geo_reverse_geocode",
        }
    }
}

/// # Errors produced by a weather lookup.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeatherError {
    /// The search input was blank.
    #[error("Enter a city name")]
    EmptyCity,

    /// The provider answered with an error body.
    #[error("{message}")]
    Provider {
        /// Provider status code (`cod`), as text.
        code: String,
        /// Provider message, e.g. "city not found".
        message: String,
    },

    /// The provider body could not be decoded.
    #[error("unexpected weather response: {error}")]
    Decode {
        /// Decoder error text.
        error: String,
    },

    /// Transport-level failure.
    #[error("weather request failed: {message}")]
    Request {
        /// Underlying error text.
        message: String,
    },

    /// Locating the user failed before the lookup started.
    #[error(transparent)]
    Geolocation(#[from] GeoError),
}

impl WeatherError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            WeatherError::EmptyCity => "weather_empty_city",
            WeatherError::Provider { .. } => "weather_provider",
            WeatherError::Decode { .. } => "weather_decode",
            WeatherError::Request { .. } => "weather_request",
            WeatherError::Geolocation(e) => e.as_label(),
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        WeatherError::Decode {
            error: e.to_string(),
        }
    }
}

/// # Errors produced by the persistence layer.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            StorageError::Io(_) => "storage_io",
            StorageError::Json(_) => "storage_json",
        }
    }
}

/// Error as it travels over the event bus: only the human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub message: String,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&str> for ErrorReport {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ErrorReport {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<WeatherError> for ErrorReport {
    fn from(e: WeatherError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<GeoError> for ErrorReport {
    fn from(e: GeoError) -> Self {
        Self::new(e.to_string())
    }
}
