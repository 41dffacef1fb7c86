//! Core library for the `skywatch` weather viewer.
//!
//! This crate defines:
//! - Configuration handling (API key, default city, units)
//! - The OpenWeatherMap client behind the [`WeatherApi`] trait
//! - Shared domain models and the [`ViewController`] owning render state
//!
//! It is used by `skywatch-cli`, but can also be reused by other binaries.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;

pub use api::{OpenWeatherClient, WeatherApi, openweather::ClientConfig};
pub use config::{Config, Units};
pub use controller::ViewController;
pub use error::FetchError;
pub use model::{CityQuery, CurrentConditions, ForecastEntry, ViewState, WeatherSnapshot};
