//! Screen state and its plain-text rendering.

use std::fmt::Write as _;

use crate::weather::WeatherData;

/// What the main content area shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Screen {
    /// Nothing rendered yet.
    #[default]
    Blank,
    /// Search form plus history list.
    Home { history: Vec<String> },
    /// Weather card for one city.
    City { city: String, weather: WeatherData },
    About,
}

impl Screen {
    /// Only the home screen has a loading indicator and an error line.
    pub fn has_status_area(&self) -> bool {
        matches!(self, Screen::Home { .. })
    }
}

/// Everything the user currently sees.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub screen: Screen,
    pub loading: bool,
    /// Visible error line (home screen only).
    pub error: Option<String>,
    /// Blocking alerts raised when no error line was on screen.
    pub alerts: Vec<String>,
}

impl ViewState {
    /// Text snapshot of the screen.
    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.screen {
            Screen::Blank => {}
            Screen::Home { history } => {
                let _ = writeln!(out, "[ city name ]  (by city)  (by location)");
                if self.loading {
                    let _ = writeln!(out, "loading...");
                }
                if let Some(err) = &self.error {
                    let _ = writeln!(out, "error: {err}");
                }
                let _ = writeln!(out, "search history:");
                if history.is_empty() {
                    let _ = writeln!(out, "  (empty)");
                }
                for city in history {
                    let _ = writeln!(out, "  * {city}  -> /city/{}", urlencoding::encode(city));
                }
            }
            Screen::City { city, weather } => {
                let _ = writeln!(out, "{city}");
                let _ = writeln!(
                    out,
                    "{}°C  {}",
                    weather.temp_rounded(),
                    weather.description().unwrap_or("")
                );
                let _ = writeln!(
                    out,
                    "wind {} m/s | humidity {}% | feels like {}°C",
                    weather.wind_speed(),
                    weather.main.humidity,
                    weather.feels_like_rounded()
                );
                let _ = writeln!(out, "(back)");
            }
            Screen::About => {
                let _ = writeln!(out, "Current weather for any city in the world,");
                let _ = writeln!(out, "by name or by your current location.");
                let _ = writeln!(out, "(back)");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_card_rounds_and_defaults_wind() {
        let state = ViewState {
            screen: Screen::City {
                city: "Berlin".into(),
                weather: WeatherData::new(14.6, 40.0, 13.2, "clear sky"),
            },
            ..ViewState::default()
        };
        let text = state.render();
        assert!(text.starts_with("Berlin\n15°C  clear sky\n"));
        assert!(text.contains("wind 0 m/s | humidity 40% | feels like 13°C"));
    }

    #[test]
    fn home_lists_history_with_encoded_links() {
        let state = ViewState {
            screen: Screen::Home {
                history: vec!["New York".into()],
            },
            loading: true,
            error: Some("city not found".into()),
            alerts: Vec::new(),
        };
        let text = state.render();
        assert!(text.contains("loading..."));
        assert!(text.contains("error: city not found"));
        assert!(text.contains("* New York  -> /city/New%20York"));
    }

    #[test]
    fn empty_history() {
        let state = ViewState {
            screen: Screen::Home { history: vec![] },
            ..ViewState::default()
        };
        assert!(state.render().contains("(empty)"));
        assert!(!Screen::About.has_status_area());
    }
}
