//! # View: screen state driven by bus events.
//!
//! Route handlers switch screens directly (`render_home`, `render_city`,
//! `render_about`); everything else arrives as events:
//!
//! ```text
//! loading(bool)          ──► loading indicator        (home screen only)
//! error(report)          ──► error line, hidden after Config::error_display
//!                            └─ no error line on screen → alert
//! weather:loaded{city}   ──► refresh history list     (home screen only)
//! ```
//!
//! The view holds no reference to the router or the bus.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::ErrorReport;
use crate::events::{Payload, ERROR, LOADING, WEATHER_LOADED};
use crate::storage::SearchHistory;
use crate::subscribers::Subscribe;
use crate::view::{Screen, ViewState};
use crate::weather::WeatherData;

/// Screen state plus the event handlers that update it.
pub struct View {
    state: Arc<Mutex<ViewState>>,
    history: Arc<SearchHistory>,
    hide_after: Option<Duration>,
    error_gen: Arc<AtomicU64>,
}

impl View {
    pub fn new(history: Arc<SearchHistory>, cfg: &Config) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewState::default())),
            history,
            hide_after: cfg.error_hide_after(),
            error_gen: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Search form with the stored history; clears loading and error.
    pub fn render_home(&self) {
        let history = self.stored_history();
        let mut state = self.state.lock();
        state.screen = Screen::Home { history };
        state.loading = false;
        state.error = None;
    }

    pub fn render_city(&self, city: impl Into<String>, weather: WeatherData) {
        let mut state = self.state.lock();
        state.screen = Screen::City {
            city: city.into(),
            weather,
        };
        state.loading = false;
        state.error = None;
    }

    pub fn render_about(&self) {
        let mut state = self.state.lock();
        state.screen = Screen::About;
        state.loading = false;
        state.error = None;
    }

    /// Shows `report` on the error line, or raises an alert when there is none.
    pub fn show_error(&self, report: &ErrorReport) {
        let mut state = self.state.lock();
        if !state.screen.has_status_area() {
            state.alerts.push(report.message.clone());
            return;
        }
        state.error = Some(report.message.clone());
        let generation = self.error_gen.fetch_add(1, Ordering::SeqCst) + 1;
        drop(state);

        let Some(delay) = self.hide_after else {
            return;
        };
        let Ok(rt) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no runtime; error line will not auto-hide");
            return;
        };
        let state = Arc::clone(&self.state);
        let error_gen = Arc::clone(&self.error_gen);
        rt.spawn(async move {
            tokio::time::sleep(delay).await;
            if error_gen.load(Ordering::SeqCst) == generation {
                state.lock().error = None;
            }
        });
    }

    pub fn show_loading(&self, on: bool) {
        let mut state = self.state.lock();
        if state.screen.has_status_area() {
            state.loading = on;
        }
    }

    /// Re-reads the history list if the home screen is showing.
    pub fn refresh_history(&self) {
        if !self.state.lock().screen.has_status_area() {
            return;
        }
        let fresh = self.stored_history();
        if let Screen::Home { history } = &mut self.state.lock().screen {
            *history = fresh;
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> ViewState {
        self.state.lock().clone()
    }

    /// Text rendering of the current state.
    pub fn render(&self) -> String {
        self.state.lock().render()
    }

    fn stored_history(&self) -> Vec<String> {
        self.history.get().unwrap_or_else(|e| {
            tracing::warn!(error = %e, label = e.as_label(), "history unreadable; showing empty list");
            Vec::new()
        })
    }
}

impl Subscribe<Payload> for View {
    fn on_event(&self, _event: &str, payload: &Payload) {
        match payload {
            Payload::Loading(on) => self.show_loading(*on),
            Payload::Error(report) => self.show_error(report),
            Payload::WeatherLoaded(_) => self.refresh_history(),
            Payload::Empty => {}
        }
    }

    fn events(&self) -> &[&'static str] {
        &[WEATHER_LOADED, ERROR, LOADING]
    }

    fn name(&self) -> &'static str {
        "view"
    }
}
