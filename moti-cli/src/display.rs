//! Human-friendly rendering of the core's data.

use chrono::{Datelike, NaiveDate};
use moti_core::{CurrentConditions, DailyForecast, FleetReport, HourlyForecast, Theme, Units};
use std::fmt::Write;

const DAYS: [&str; 7] = ["Diele", "Hënë", "Martë", "Mërkurë", "Enjte", "Premte", "Shtunë"];
const MONTHS: [&str; 12] = [
    "Jan", "Shk", "Mar", "Pri", "Maj", "Qer", "Kor", "Gus", "Sht", "Tet", "Nën", "Dhj",
];

const RESET: &str = "\x1b[0m";

/// Rendering settings taken from the user's preferences.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub units: Units,
    pub theme: Theme,
}

impl Style {
    fn accent(&self, text: &str) -> String {
        let color = match self.theme {
            Theme::Light => "\x1b[34m",
            Theme::Dark => "\x1b[94m",
            Theme::Kosovo => "\x1b[33m",
        };
        format!("{color}{text}{RESET}")
    }
}

/// Temperature rounded to a whole degree, halves toward +∞, with the unit symbol.
pub fn format_temp(temp: f64, units: Units) -> String {
    format!("{}{}", (temp + 0.5).floor() as i64, units.temperature_symbol())
}

pub fn weather_icon(icon_code: &str) -> &'static str {
    match icon_code {
        "01d" => "☀️",
        "01n" => "🌙",
        "02d" => "⛅",
        "02n" | "03d" | "03n" | "04d" | "04n" => "☁️",
        "09d" | "09n" | "10n" => "🌧️",
        "10d" => "🌦️",
        "11d" | "11n" => "⛈️",
        "13d" | "13n" => "❄️",
        "50d" | "50n" => "🌫️",
        _ => "🌈",
    }
}

/// Day label in Albanian: `Sot` for today, otherwise e.g. `Hënë, 3 Nën`.
pub fn day_label(date: NaiveDate, is_today: bool) -> String {
    if is_today {
        return "Sot".to_string();
    }

    let day = DAYS[date.weekday().num_days_from_sunday() as usize];
    let month = MONTHS[date.month0() as usize];
    format!("{day}, {} {month}", date.day())
}

pub fn format_visibility(visibility_m: Option<u32>) -> String {
    match visibility_m {
        Some(m) if m > 0 => format!("{:.1} km", f64::from(m) / 1000.0),
        _ => "--".to_string(),
    }
}

pub fn format_wind(speed: f64, units: Units) -> String {
    format!("{speed} {}", units.wind_speed_unit())
}

pub fn current_card(current: &CurrentConditions, style: Style) -> String {
    let units = style.units;
    let mut out = String::new();

    let _ = writeln!(out, "{}, {}", current.name, current.country);
    let _ = writeln!(
        out,
        "  {} {}  {}",
        weather_icon(&current.condition.icon),
        style.accent(&format_temp(current.temperature, units)),
        current.condition.description,
    );
    let _ = writeln!(
        out,
        "  Ndjehet si {}",
        format_temp(current.feels_like, units)
    );
    let _ = writeln!(
        out,
        "  💧 Lagështia {}%  🌡️ Presioni {} hPa  💨 Era {}  👁️ Dukshmëria {}",
        current.humidity_pct,
        current.pressure_hpa,
        format_wind(current.wind_speed, units),
        format_visibility(current.visibility_m),
    );

    out
}

pub fn hourly_row(hourly: &[HourlyForecast], style: Style) -> String {
    hourly
        .iter()
        .map(|h| {
            format!(
                "{}:00 {} {}",
                h.hour,
                weather_icon(&h.condition.icon),
                style.accent(&format_temp(h.temperature, style.units)),
            )
        })
        .collect::<Vec<_>>()
        .join("  |  ")
}

pub fn daily_table(daily: &[DailyForecast], style: Style) -> String {
    let mut out = String::new();

    for (idx, day) in daily.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:<16} {} {:>6}  {}",
            day_label(day.date, idx == 0),
            weather_icon(&day.condition.icon),
            style.accent(&format_temp(day.avg_temperature, style.units)),
            day.condition.description,
        );
    }

    out
}

pub fn fleet_cards(report: &FleetReport, style: Style) -> String {
    report
        .conditions
        .iter()
        .map(|c| current_card(c, style))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use moti_core::Condition;

    fn style() -> Style {
        Style {
            units: Units::Metric,
            theme: Theme::Light,
        }
    }

    #[test]
    fn temperature_is_rounded_with_symbol() {
        assert_eq!(format_temp(12.6, Units::Metric), "13°C");
        assert_eq!(format_temp(-0.4, Units::Metric), "0°C");
        assert_eq!(format_temp(70.2, Units::Imperial), "70°F");
    }

    #[test]
    fn negative_halves_round_up() {
        assert_eq!(format_temp(-2.5, Units::Metric), "-2°C");
        assert_eq!(format_temp(2.5, Units::Metric), "3°C");
        assert_eq!(format_temp(-2.6, Units::Metric), "-3°C");
    }

    #[test]
    fn icons_fall_back_to_rainbow() {
        assert_eq!(weather_icon("01d"), "☀️");
        assert_eq!(weather_icon("10d"), "🌦️");
        assert_eq!(weather_icon("10n"), "🌧️");
        assert_eq!(weather_icon("zz"), "🌈");
    }

    #[test]
    fn albanian_day_labels() {
        let date = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(); // a Monday
        assert_eq!(day_label(date, true), "Sot");
        assert_eq!(day_label(date, false), "Hënë, 2 Nën");

        let sunday = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(day_label(sunday, false), "Diele, 1 Mar");
    }

    #[test]
    fn visibility_in_km() {
        assert_eq!(format_visibility(Some(10_000)), "10.0 km");
        assert_eq!(format_visibility(Some(2_460)), "2.5 km");
        assert_eq!(format_visibility(None), "--");
    }

    #[test]
    fn wind_uses_unit_system() {
        assert_eq!(format_wind(3.6, Units::Metric), "3.6 m/s");
        assert_eq!(format_wind(8.0, Units::Imperial), "8 mph");
    }

    #[test]
    fn current_card_lists_details() {
        let current = CurrentConditions {
            city_id: 786714,
            name: "Prishtina".into(),
            country: "XK".into(),
            temperature: 18.4,
            feels_like: 17.6,
            humidity_pct: 60,
            pressure_hpa: 1016,
            wind_speed: 3.6,
            visibility_m: Some(10_000),
            condition: Condition {
                id: 800,
                icon: "01d".into(),
                description: "clear sky".into(),
            },
        };

        let card = current_card(&current, style());

        assert!(card.starts_with("Prishtina, XK"));
        assert!(card.contains("18°C"));
        assert!(card.contains("Ndjehet si 18°C"));
        assert!(card.contains("1016 hPa"));
        assert!(card.contains("10.0 km"));
    }
}
