//! # Search history: most-recently-used city names.
//!
//! Stored as a JSON array under [`Config::history_key`](crate::Config::history_key):
//! ```text
//! add("Oslo")   ["Berlin", "Oslo", "Rome"] → ["Oslo", "Berlin", "Rome"]
//! add("Paris")  ["Oslo", ...9 more]        → ["Paris", "Oslo", ...8 more]
//! ```
//!
//! ## Rules
//! - Newest first; re-adding a city moves it to the front (no duplicates).
//! - Never longer than [`Config::history_cap`](crate::Config::history_cap).
//! - A key that was never written reads as an empty list.

use std::sync::Arc;

use crate::config::Config;
use crate::error::StorageError;
use crate::events::{Payload, WEATHER_LOADED};
use crate::storage::Storage;
use crate::subscribers::Subscribe;

/// Bounded, de-duplicated list of searched cities.
pub struct SearchHistory {
    storage: Arc<dyn Storage>,
    key: String,
    cap: Option<usize>,
}

impl SearchHistory {
    pub fn new(storage: Arc<dyn Storage>, cfg: &Config) -> Self {
        Self {
            storage,
            key: cfg.history_key.clone(),
            cap: cfg.history_cap(),
        }
    }

    /// Moves `city` to the front, trims to capacity, persists, and returns the new list.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use skycast::{Config, MemoryStorage, SearchHistory};
    ///
    /// let history = SearchHistory::new(Arc::new(MemoryStorage::new()), &Config::default());
    /// history.add("Moscow").unwrap();
    /// history.add("Moscow").unwrap();
    /// assert_eq!(history.get().unwrap(), vec!["Moscow"]);
    /// ```
    pub fn add(&self, city: &str) -> Result<Vec<String>, StorageError> {
        let mut list = self.get()?;
        list.retain(|item| item != city);
        list.insert(0, city.to_string());
        if let Some(cap) = self.cap {
            list.truncate(cap);
        }
        self.storage
            .set_item(&self.key, &serde_json::to_string(&list)?)?;
        Ok(list)
    }

    /// Returns the stored list, newest first.
    pub fn get(&self) -> Result<Vec<String>, StorageError> {
        match self.storage.get_item(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }
}

/// Subscriber that records every city announced by `weather:loaded`.
pub struct HistoryRecorder {
    history: Arc<SearchHistory>,
}

impl HistoryRecorder {
    pub fn new(history: Arc<SearchHistory>) -> Self {
        Self { history }
    }
}

impl Subscribe<Payload> for HistoryRecorder {
    fn on_event(&self, _event: &str, payload: &Payload) {
        let Some(loaded) = payload.as_weather() else {
            return;
        };
        if let Err(e) = self.history.add(&loaded.city) {
            tracing::warn!(city = %loaded.city, error = %e, label = e.as_label(), "history not saved");
        }
    }

    fn events(&self) -> &[&'static str] {
        &[WEATHER_LOADED]
    }

    fn name(&self) -> &'static str {
        "history"
    }
}
