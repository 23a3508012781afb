//! # Application configuration.
//!
//! Provides [`Config`] centralized settings for the router, the search history
//! and the view model.
//!
//! Config is used in two ways:
//! 1. **App creation**: `App::builder(config)`
//! 2. **Component defaults**: `Router::new(host, &config)`, `SearchHistory::new(storage, &config)`
//!
//! ## Sentinel values
//! - `history_limit = 0` → unbounded history
//! - `error_display = 0s` → error message is never auto-hidden

use std::time::Duration;

/// Global configuration for the application.
///
/// Defines:
/// - **Routing**: home path, parameter marker, in-app link attribute
/// - **Persistence**: storage keys, capacity of the search history
/// - **View**: how long an error message stays visible
///
/// ## Notes
/// All fields are public for flexibility. Prefer using helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path used as the fallback target when nothing matches.
    pub home_path: String,

    /// Prefix marking a parameter segment in a route pattern (`:name`).
    pub param_marker: char,

    /// Attribute that flags an anchor for in-app routing.
    pub router_attribute: String,

    /// Storage key of the search history.
    pub history_key: String,

    /// Storage key set to `"granted"` once a position was resolved to a city.
    pub geo_permission_key: String,

    /// Maximum number of remembered cities.
    ///
    /// - `0` = unbounded
    /// - `n > 0` = at most `n` entries, newest first
    pub history_limit: usize,

    /// How long an error message stays visible.
    ///
    /// - `Duration::ZERO` = stays until replaced
    /// - `> 0` = hidden after this delay
    pub error_display: Duration,
}

impl Config {
    /// Returns the history capacity as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → at most `n` entries
    #[inline]
    pub fn history_cap(&self) -> Option<usize> {
        if self.history_limit == 0 {
            None
        } else {
            Some(self.history_limit)
        }
    }

    /// Returns the error auto-hide delay as an `Option`.
    #[inline]
    pub fn error_hide_after(&self) -> Option<Duration> {
        if self.error_display == Duration::ZERO {
            None
        } else {
            Some(self.error_display)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `home_path = "/"`
    /// - `param_marker = ':'`
    /// - `router_attribute = "data-router"`
    /// - `history_key = "weatherHistory"`
    /// - `geo_permission_key = "geoPermission"`
    /// - `history_limit = 10`
    /// - `error_display = 5s`
    fn default() -> Self {
        Self {
            home_path: "/".to_string(),
            param_marker: ':',
            router_attribute: "data-router".to_string(),
            history_key: "weatherHistory".to_string(),
            geo_permission_key: "geoPermission".to_string(),
            history_limit: 10,
            error_display: Duration::from_secs(5),
        }
    }
}
