//! Reshapes the raw 3-hour forecast list into hourly and daily views.

use chrono::{Local, NaiveDate, TimeZone, Timelike};

use crate::model::{DailyForecast, ForecastSample, ForecastSummary, HourlyForecast};

/// Upper bound on the hourly lookahead.
pub const MAX_HOURLY: usize = 8;
/// Upper bound on the daily summary.
pub const MAX_DAILY: usize = 5;

/// Aggregate samples, grouping days in the observer's local time zone.
pub fn aggregate(samples: &[ForecastSample]) -> ForecastSummary {
    aggregate_in(samples, &Local)
}

/// Aggregate samples, grouping days and reading clock hours in `tz`.
///
/// Samples are expected in chronological order. Day groups keep first-seen
/// order and are not re-sorted.
pub fn aggregate_in<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> ForecastSummary {
    ForecastSummary {
        hourly: hourly_in(samples, tz),
        daily: daily_in(samples, tz),
    }
}

fn hourly_in<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<HourlyForecast> {
    samples
        .iter()
        .take(MAX_HOURLY)
        .map(|s| HourlyForecast {
            hour: s.timestamp.with_timezone(tz).hour(),
            temperature: s.temperature,
            condition: s.condition.clone(),
        })
        .collect()
}

fn daily_in<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DailyForecast> {
    let mut groups: Vec<(NaiveDate, Vec<ForecastSample>)> = Vec::new();

    for sample in samples {
        let date = sample.timestamp.with_timezone(tz).date_naive();

        // At most MAX_DAILY groups, so a linear scan is fine.
        match groups.iter_mut().find(|(d, _)| *d == date) {
            Some((_, members)) => members.push(sample.clone()),
            None => {
                if groups.len() == MAX_DAILY {
                    continue;
                }
                groups.push((date, vec![sample.clone()]));
            }
        }
    }

    groups
        .into_iter()
        .filter_map(|(date, members)| summarize_day(date, members))
        .collect()
}

fn summarize_day(date: NaiveDate, samples: Vec<ForecastSample>) -> Option<DailyForecast> {
    let first = samples.first()?;
    let avg_temperature =
        samples.iter().map(|s| s.temperature).sum::<f64>() / samples.len() as f64;

    Some(DailyForecast {
        date,
        condition: first.condition.clone(),
        humidity_pct: first.humidity_pct,
        wind_speed: first.wind_speed,
        avg_temperature,
        samples,
    })
}
