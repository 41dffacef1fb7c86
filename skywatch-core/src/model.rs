use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of forecast entries kept from an upstream response.
pub const FORECAST_LEN: usize = 6;

/// Image URL template for OpenWeatherMap condition icons.
const ICON_URL_TEMPLATE: &str = "https://openweathermap.org/img/wn";

/// A validated city search query.
///
/// Always non-empty: construction trims the input and rejects blank strings,
/// so both API calls are guaranteed a usable `q` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityQuery(String);

impl CityQuery {
    /// Trim `text` and build a query, or `None` if nothing is left.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CityQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current conditions for one location, replaced wholesale on every
/// successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub country: String,
    /// Temperature in the configured display units; rounded only for display.
    pub temperature: f64,
    pub description: String,
}

impl CurrentConditions {
    pub fn rounded_temperature(&self) -> i64 {
        self.temperature.round() as i64
    }
}

/// One slot of the short-term forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

impl ForecastEntry {
    pub fn rounded_temperature(&self) -> i64 {
        self.temperature.round() as i64
    }

    /// URL of the condition icon on OpenWeatherMap's image host.
    pub fn icon_url(&self) -> String {
        format!("{ICON_URL_TEMPLATE}/{}@2x.png", self.icon)
    }
}

/// The pair of results a successful fetch replaces atomically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastEntry>,
}

impl WeatherSnapshot {
    /// Build a snapshot, keeping at most [`FORECAST_LEN`] forecast entries
    /// in their original upstream order.
    pub fn new(current: CurrentConditions, mut forecast: Vec<ForecastEntry>) -> Self {
        forecast.truncate(FORECAST_LEN);
        Self { current, forecast }
    }
}

/// What the UI should display right now.
///
/// `Loading` suppresses any prior data; `Empty` means no fetch has ever
/// succeeded for this session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewState<'a> {
    Loading,
    Loaded(&'a CurrentConditions, &'a [ForecastEntry]),
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(dt: i64) -> ForecastEntry {
        ForecastEntry {
            timestamp: DateTime::from_timestamp(dt, 0).expect("valid timestamp"),
            temperature: 10.0,
            description: "overcast clouds".to_owned(),
            icon: "04d".to_owned(),
        }
    }

    fn conditions() -> CurrentConditions {
        CurrentConditions {
            name: "Toronto".to_owned(),
            country: "CA".to_owned(),
            temperature: 21.4,
            description: "clear sky".to_owned(),
        }
    }

    #[test]
    fn city_query_trims_input() {
        let query = CityQuery::parse("  Toronto ").expect("non-blank query");
        assert_eq!(query.as_str(), "Toronto");
    }

    #[test]
    fn city_query_rejects_blank_input() {
        assert_eq!(CityQuery::parse(""), None);
        assert_eq!(CityQuery::parse("   \t "), None);
    }

    #[test]
    fn snapshot_truncates_long_forecast_preserving_order() {
        let forecast: Vec<_> = (0..10).map(|i| entry(1_700_000_000 + i * 3600)).collect();
        let expected: Vec<_> = forecast[..FORECAST_LEN].to_vec();

        let snapshot = WeatherSnapshot::new(conditions(), forecast);

        assert_eq!(snapshot.forecast.len(), FORECAST_LEN);
        assert_eq!(snapshot.forecast, expected);
    }

    #[test]
    fn snapshot_keeps_short_forecast_whole() {
        let forecast: Vec<_> = (0..3).map(|i| entry(1_700_000_000 + i * 3600)).collect();

        let snapshot = WeatherSnapshot::new(conditions(), forecast.clone());

        assert_eq!(snapshot.forecast, forecast);
    }

    #[test]
    fn temperature_rounds_to_nearest_integer() {
        assert_eq!(conditions().rounded_temperature(), 21);

        let mut warm = conditions();
        warm.temperature = 21.5;
        assert_eq!(warm.rounded_temperature(), 22);
    }

    #[test]
    fn icon_url_uses_fixed_template() {
        assert_eq!(
            entry(1_700_000_000).icon_url(),
            "https://openweathermap.org/img/wn/04d@2x.png"
        );
    }
}
