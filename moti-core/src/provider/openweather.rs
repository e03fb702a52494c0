use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    error::WeatherError,
    model::{CityForecast, Condition, CurrentConditions, ForecastSample, Units},
    provider::normalize_city,
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const REQUEST_TIMEOUT_SECS: u64 = 15;
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Country code used when the API leaves `sys.country` out, which it does for
/// several Kosovo municipalities.
const FALLBACK_COUNTRY: &str = "XK";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    units: Units,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>, units: Units) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            api_key: api_key.into(),
            units,
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        })
    }

    /// Point the client at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/data/2.5/{endpoint}", self.base_url);

        tracing::debug!(city = %city, endpoint = %endpoint, units = %self.units, "Requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::debug!(
                city = %city,
                status = %status,
                body = %truncate_body(&body),
                "OpenWeather request failed"
            );
            return Err(WeatherError::from_status(status, city));
        }

        let body = res.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            WeatherError::MalformedResponse(format!("{endpoint} for {city}: {e}"))
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u32,
    icon: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize, Default)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    id: u64,
    name: String,
    #[serde(default)]
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

fn first_condition(weather: Vec<OwWeather>) -> Condition {
    weather
        .into_iter()
        .next()
        .map(|w| Condition {
            id: w.id,
            icon: w.icon,
            description: w.description,
        })
        .unwrap_or_else(|| Condition {
            id: 0,
            icon: String::new(),
            description: "Unknown".to_string(),
        })
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(parsed: OwCurrentResponse) -> Self {
        Self {
            city_id: parsed.id,
            name: parsed.name,
            country: parsed
                .sys
                .country
                .unwrap_or_else(|| FALLBACK_COUNTRY.to_string()),
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed: parsed.wind.speed,
            visibility_m: parsed.visibility,
            condition: first_condition(parsed.weather),
        }
    }
}

impl TryFrom<OwForecastEntry> for ForecastSample {
    type Error = WeatherError;

    fn try_from(entry: OwForecastEntry) -> Result<Self, Self::Error> {
        let timestamp: DateTime<Utc> = DateTime::from_timestamp(entry.dt, 0).ok_or_else(|| {
            WeatherError::MalformedResponse(format!("timestamp {} out of range", entry.dt))
        })?;

        Ok(Self {
            timestamp,
            temperature: entry.main.temp,
            humidity_pct: entry.main.humidity,
            wind_speed: entry.wind.speed,
            condition: first_condition(entry.weather),
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let city = normalize_city(city)?;
        let parsed: OwCurrentResponse = self.get_json("weather", city).await?;
        Ok(parsed.into())
    }

    async fn fetch_forecast(&self, city: &str) -> Result<CityForecast, WeatherError> {
        let city = normalize_city(city)?;
        let parsed: OwForecastResponse = self.get_json("forecast", city).await?;

        let samples = parsed
            .list
            .into_iter()
            .map(ForecastSample::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CityForecast {
            city: parsed.city.name,
            country: parsed
                .city
                .country
                .unwrap_or_else(|| FALLBACK_COUNTRY.to_string()),
            samples,
        })
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
