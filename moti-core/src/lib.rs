//! Core library for the `moti` weather CLI.
//!
//! This crate defines:
//! - The OpenWeatherMap client behind the [`WeatherSource`] trait
//! - Forecast aggregation into hourly and daily views
//! - Concurrent multi-city fetching that tolerates per-city failures
//! - Preferences (API key, units, theme, favorite cities) and their storage
//!
//! It is used by `moti-cli`, but can also be reused by other front ends.

pub mod aggregate;
pub mod cities;
pub mod config;
pub mod error;
pub mod favorites;
pub mod fleet;
pub mod model;
pub mod provider;

pub use aggregate::{aggregate, aggregate_in};
pub use config::{Config, Theme};
pub use error::WeatherError;
pub use favorites::FavoriteCities;
pub use fleet::{
    CityReport, Dashboard, FleetFailure, FleetReport, fetch_all, fetch_city, load_dashboard,
};
pub use model::{
    CityForecast, Condition, CurrentConditions, DailyForecast, ForecastSample, ForecastSummary,
    HourlyForecast, Units,
};
pub use provider::{WeatherSource, client_from_config, openweather::OpenWeatherClient};
