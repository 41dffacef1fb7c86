use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::Units,
    error::{FetchError, truncate_body},
    model::{CityQuery, CurrentConditions, ForecastEntry},
};

use super::WeatherApi;

/// Production OpenWeatherMap endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Explicit client configuration, handed in at construction time instead of
/// read from the environment inside the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    /// Endpoint root; overridable so tests can point at a local mock server.
    pub base_url: String,
    pub units: Units,
}

impl ClientConfig {
    pub fn new(api_key: String, units: Units) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            units,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    config: ClientConfig,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// GET `{base}/{endpoint}?q=...&appid=...&units=...` and decode the body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &CityQuery,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{endpoint}", self.config.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("appid", self.config.api_key.as_str()),
                ("units", self.config.units.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn current(&self, query: &CityQuery) -> Result<CurrentConditions, FetchError> {
        debug!(city = query.as_str(), "requesting current conditions");

        let parsed: OwCurrentResponse = self.get_json("weather", query).await?;

        let description = parsed
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "Unknown".to_owned());

        Ok(CurrentConditions {
            name: parsed.name,
            country: parsed.sys.country,
            temperature: parsed.main.temp,
            description,
        })
    }

    async fn forecast(&self, query: &CityQuery) -> Result<Vec<ForecastEntry>, FetchError> {
        debug!(city = query.as_str(), "requesting forecast");

        let parsed: OwForecastResponse = self.get_json("forecast", query).await?;

        Ok(parsed.list.into_iter().map(entry_from_wire).collect())
    }
}

fn entry_from_wire(entry: OwForecastEntry) -> ForecastEntry {
    let (description, icon) = entry
        .weather
        .into_iter()
        .next()
        .map(|w| (w.description, w.icon))
        .unwrap_or_else(|| ("Unknown".to_owned(), String::new()));

    ForecastEntry {
        timestamp: DateTime::from_timestamp(entry.dt, 0).unwrap_or_else(Utc::now),
        temperature: entry.main.temp,
        description,
        icon,
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}
