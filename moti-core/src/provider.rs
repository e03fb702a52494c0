use crate::{
    Config,
    error::WeatherError,
    model::{CityForecast, CurrentConditions},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of weather data for a single city.
///
/// Implementations never retry and hold no mutable state; callers decide what
/// to do with a failure.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError>;

    async fn fetch_forecast(&self, city: &str) -> Result<CityForecast, WeatherError>;
}

/// Construct the OpenWeatherMap client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
                 Hint: run `moti configure` and enter your OpenWeatherMap API key."
        )
    })?;

    Ok(OpenWeatherClient::new(api_key, config.units)?)
}

/// Trim the city name, rejecting names that are empty once trimmed.
pub(crate) fn normalize_city(city: &str) -> Result<&str, WeatherError> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err(WeatherError::InvalidInput);
    }
    Ok(trimmed)
}
