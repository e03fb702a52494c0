//! Fetch orchestration across one or many cities.

use futures_util::future::join_all;

use crate::{
    aggregate::aggregate,
    error::WeatherError,
    model::{CityForecast, CurrentConditions, ForecastSummary},
    provider::WeatherSource,
};

/// A city whose lookup failed during a fleet fetch.
#[derive(Debug)]
pub struct FleetFailure {
    pub city: String,
    pub error: WeatherError,
}

/// Outcome of a fleet fetch: successes in input order, failures kept aside.
#[derive(Debug, Default)]
pub struct FleetReport {
    pub conditions: Vec<CurrentConditions>,
    pub failures: Vec<FleetFailure>,
}

/// Everything the single-city view needs.
#[derive(Debug, Clone)]
pub struct CityReport {
    pub current: CurrentConditions,
    pub forecast: CityForecast,
    pub summary: ForecastSummary,
}

/// Multi-city view: current conditions for each city plus the forecast of the
/// first city that answered.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub report: FleetReport,
    pub forecast: Option<(CityForecast, ForecastSummary)>,
}

/// Fetch current conditions for every city concurrently.
///
/// Never fails: a city whose request fails is logged, left out of
/// `conditions` and recorded in `failures`.
pub async fn fetch_all<S, C>(source: &S, cities: &[C]) -> FleetReport
where
    S: WeatherSource + ?Sized,
    C: AsRef<str>,
{
    if cities.is_empty() {
        return FleetReport::default();
    }

    let requests = cities.iter().map(|city| source.fetch_current(city.as_ref()));
    let results = join_all(requests).await;

    let mut report = FleetReport::default();
    for (city, result) in cities.iter().zip(results) {
        match result {
            Ok(current) => report.conditions.push(current),
            Err(error) => {
                tracing::warn!(city = %city.as_ref(), error = %error, "Skipping city in fleet fetch");
                report.failures.push(FleetFailure {
                    city: city.as_ref().to_string(),
                    error,
                });
            }
        }
    }

    tracing::debug!(
        requested = cities.len(),
        succeeded = report.conditions.len(),
        failed = report.failures.len(),
        "Fleet fetch finished"
    );

    report
}

/// Current conditions followed by the forecast for one city.
pub async fn fetch_city<S>(source: &S, city: &str) -> Result<CityReport, WeatherError>
where
    S: WeatherSource + ?Sized,
{
    let current = source.fetch_current(city).await?;
    let forecast = source.fetch_forecast(city).await?;
    let summary = aggregate(&forecast.samples);

    Ok(CityReport {
        current,
        forecast,
        summary,
    })
}

/// Fleet fetch, then the forecast of the first successful city.
pub async fn load_dashboard<S, C>(source: &S, cities: &[C]) -> Dashboard
where
    S: WeatherSource + ?Sized,
    C: AsRef<str>,
{
    let report = fetch_all(source, cities).await;

    let Some(first) = report.conditions.first() else {
        return Dashboard {
            report,
            forecast: None,
        };
    };

    let forecast = match source.fetch_forecast(&first.name).await {
        Ok(forecast) => {
            let summary = aggregate(&forecast.samples);
            Some((forecast, summary))
        }
        Err(error) => {
            tracing::warn!(city = %first.name, error = %error, "Dashboard forecast unavailable");
            None
        }
    };

    Dashboard { report, forecast }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, ForecastSample};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory source; cities listed in `failing` answer with `NotFound`.
    #[derive(Debug, Default)]
    struct FakeSource {
        failing: Vec<&'static str>,
        forecast_fails: bool,
        calls: AtomicUsize,
        log: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn failing(cities: &[&'static str]) -> Self {
            Self {
                failing: cities.to_vec(),
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn log(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    fn condition() -> Condition {
        Condition {
            id: 801,
            icon: "02d".into(),
            description: "few clouds".into(),
        }
    }

    #[async_trait]
    impl WeatherSource for FakeSource {
        async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.log.lock().unwrap().push(format!("current:{city}"));

            if city.trim().is_empty() {
                return Err(WeatherError::InvalidInput);
            }
            if self.failing.iter().any(|failing| *failing == city) {
                return Err(WeatherError::NotFound(city.to_string()));
            }

            Ok(CurrentConditions {
                city_id: city.len() as u64,
                name: city.to_string(),
                country: "XK".into(),
                temperature: 15.0,
                feels_like: 14.0,
                humidity_pct: 55,
                pressure_hpa: 1012,
                wind_speed: 3.0,
                visibility_m: Some(10_000),
                condition: condition(),
            })
        }

        async fn fetch_forecast(&self, city: &str) -> Result<CityForecast, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.log.lock().unwrap().push(format!("forecast:{city}"));

            if self.forecast_fails {
                return Err(WeatherError::RateLimited);
            }

            let start = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
            let samples = [10.0, 12.0, 14.0]
                .iter()
                .enumerate()
                .map(|(i, t)| ForecastSample {
                    timestamp: start + chrono::Duration::hours(3 * i as i64),
                    temperature: *t,
                    humidity_pct: 60,
                    wind_speed: 2.0,
                    condition: condition(),
                })
                .collect();

            Ok(CityForecast {
                city: city.to_string(),
                country: "XK".into(),
                samples,
            })
        }
    }

    #[tokio::test]
    async fn empty_city_list_makes_no_calls() {
        let source = FakeSource::default();
        let cities: [&str; 0] = [];

        let report = fetch_all(&source, &cities).await;

        assert!(report.conditions.is_empty());
        assert!(report.failures.is_empty());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn one_failure_is_recorded_not_propagated() {
        let source = FakeSource::failing(&["Atlantis"]);

        let report = fetch_all(&source, &["Prishtina", "Atlantis", "Peja"]).await;

        assert_eq!(report.conditions.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].city, "Atlantis");
        assert!(matches!(report.failures[0].error, WeatherError::NotFound(_)));
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn results_follow_input_order() {
        let source = FakeSource::failing(&["Ferizaj"]);
        let cities = vec![
            "Gjilan".to_string(),
            "Ferizaj".to_string(),
            "Prizren".to_string(),
            "Prishtina".to_string(),
        ];

        let report = fetch_all(&source, &cities).await;

        let names: Vec<&str> = report.conditions.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Gjilan", "Prizren", "Prishtina"]);
    }

    #[tokio::test]
    async fn all_failing_yields_empty_conditions() {
        let source = FakeSource::failing(&["A", "B"]);

        let report = fetch_all(&source, &["A", "B"]).await;

        assert!(report.conditions.is_empty());
        assert_eq!(report.failures.len(), 2);
    }

    #[tokio::test]
    async fn fetch_city_calls_current_then_forecast() {
        let source = FakeSource::default();

        let report = fetch_city(&source, "Prizren").await.unwrap();

        assert_eq!(source.log(), vec!["current:Prizren", "forecast:Prizren"]);
        assert_eq!(report.current.name, "Prizren");
        assert_eq!(report.summary.daily.len(), 1);
        assert_eq!(report.summary.daily[0].avg_temperature, 12.0);
        assert_eq!(report.summary.hourly.len(), 3);
    }

    #[tokio::test]
    async fn fetch_city_stops_after_current_failure() {
        let source = FakeSource::failing(&["Atlantis"]);

        let err = fetch_city(&source, "Atlantis").await.unwrap_err();

        assert!(matches!(err, WeatherError::NotFound(_)));
        assert_eq!(source.log(), vec!["current:Atlantis"]);
    }

    #[tokio::test]
    async fn dashboard_forecasts_first_successful_city() {
        let source = FakeSource::failing(&["Prishtina"]);

        let dashboard = load_dashboard(&source, &["Prishtina", "Prizren", "Peja"]).await;

        assert_eq!(dashboard.report.conditions.len(), 2);
        let (forecast, summary) = dashboard.forecast.expect("forecast for Prizren");
        assert_eq!(forecast.city, "Prizren");
        assert_eq!(summary.daily.len(), 1);

        let forecasts: Vec<String> = source
            .log()
            .into_iter()
            .filter(|entry| entry.starts_with("forecast:"))
            .collect();
        assert_eq!(forecasts, vec!["forecast:Prizren"]);
    }

    #[tokio::test]
    async fn dashboard_without_successes_skips_forecast() {
        let source = FakeSource::failing(&["A"]);

        let dashboard = load_dashboard(&source, &["A"]).await;

        assert!(dashboard.forecast.is_none());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn dashboard_survives_forecast_failure() {
        let source = FakeSource {
            forecast_fails: true,
            ..FakeSource::default()
        };

        let dashboard = load_dashboard(&source, &["Peja"]).await;

        assert_eq!(dashboard.report.conditions.len(), 1);
        assert!(dashboard.forecast.is_none());
    }
}
