use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::FetchError,
    model::{CityQuery, CurrentConditions, ForecastEntry},
};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// The two upstream calls the view depends on.
///
/// `forecast` returns the list exactly as the provider ordered it; callers
/// decide how much of it to keep.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    async fn current(&self, query: &CityQuery) -> Result<CurrentConditions, FetchError>;

    async fn forecast(&self, query: &CityQuery) -> Result<Vec<ForecastEntry>, FetchError>;
}
