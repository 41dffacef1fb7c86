use tracing::warn;

use crate::{
    api::WeatherApi,
    error::FetchError,
    model::{CityQuery, ViewState, WeatherSnapshot},
};

/// Owner of everything the view renders: the active city, the pending search
/// text, the last successful snapshot, and the loading flag.
///
/// All writes happen through `&mut self` on one logical thread, so two
/// refreshes can never overlap.
#[derive(Debug)]
pub struct ViewController {
    api: Box<dyn WeatherApi>,
    city: CityQuery,
    search_text: String,
    snapshot: Option<WeatherSnapshot>,
    loading: bool,
}

impl ViewController {
    /// The caller is expected to follow up with [`refresh`](Self::refresh)
    /// once, for the initial load of `default_city`.
    pub fn new(api: Box<dyn WeatherApi>, default_city: CityQuery) -> Self {
        Self {
            api,
            city: default_city,
            search_text: String::new(),
            snapshot: None,
            loading: false,
        }
    }

    pub fn city(&self) -> &CityQuery {
        &self.city
    }

    /// Store raw user input. No validation, no side effect.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Make the pending search text the active city.
    ///
    /// Returns `true` when the active city actually changed, which is the
    /// caller's cue to invoke [`refresh`](Self::refresh) exactly once.
    /// Blank input and resubmission of the current city are silently ignored.
    pub fn submit_search(&mut self) -> bool {
        match CityQuery::parse(&self.search_text) {
            Some(query) if query != self.city => {
                self.city = query;
                true
            }
            _ => false,
        }
    }

    /// Fetch current conditions and forecast for the active city.
    ///
    /// The forecast request is only issued after current conditions arrived.
    /// Any failure is logged and swallowed, leaving the previous snapshot in
    /// place; the loading flag is cleared on every path out.
    pub async fn refresh(&mut self) {
        self.loading = true;

        match self.fetch_snapshot().await {
            Ok(snapshot) => self.snapshot = Some(snapshot),
            Err(err) => {
                warn!(city = self.city.as_str(), error = %err, "weather fetch failed");
            }
        }

        self.loading = false;
    }

    async fn fetch_snapshot(&self) -> Result<WeatherSnapshot, FetchError> {
        let current = self.api.current(&self.city).await?;
        let forecast = self.api.forecast(&self.city).await?;

        Ok(WeatherSnapshot::new(current, forecast))
    }

    pub fn view_state(&self) -> ViewState<'_> {
        if self.loading {
            ViewState::Loading
        } else if let Some(snapshot) = &self.snapshot {
            ViewState::Loaded(&snapshot.current, &snapshot.forecast)
        } else {
            ViewState::Empty
        }
    }
}
