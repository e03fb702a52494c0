use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use moti_core::{
    Config, OpenWeatherClient, Theme, Units, WeatherError, cities, client_from_config, fetch_city,
    load_dashboard,
};

use crate::display::{self, Style};

/// Overrides the stored API key for a single run.
const API_KEY_ENV: &str = "MOTI_API_KEY";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "moti", version, about = "Weather for Kosovo municipalities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the OpenWeatherMap API key, units and theme interactively.
    Configure,

    /// Show current weather, the next hours and five days for a city.
    Show {
        /// City name, e.g. "Prishtina".
        city: String,
    },

    /// Show current weather for your favorite cities.
    Dashboard,

    /// Manage favorite cities.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Set units; toggles between metric and imperial when no value is given.
    Units {
        /// "metric" or "imperial".
        units: Option<String>,
    },

    /// Set the color theme.
    Theme {
        /// "light", "dark" or "kosovo".
        theme: String,
    },

    /// Suggest Kosovo municipalities matching a query.
    Search {
        query: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// List favorite cities.
    List,
    /// Add a city to favorites.
    Add { city: String },
    /// Remove a city from favorites.
    Remove { city: String },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(&mut config)?,
            Command::Show { city } => show(&config, &city).await?,
            Command::Dashboard => dashboard(&config).await?,
            Command::Favorites { action } => favorites(&mut config, action)?,
            Command::Units { units } => {
                let units = match units {
                    Some(value) => {
                        config.units = value.parse()?;
                        config.units
                    }
                    None => config.toggle_units(),
                };
                config.save()?;
                println!("Njësitë: {units}");
            }
            Command::Theme { theme } => {
                config.theme = theme.parse()?;
                config.save()?;
                println!("Tema: {}", config.theme);
            }
            Command::Search { query } => {
                let hits = cities::search(&query);
                if hits.is_empty() {
                    println!("Asnjë qytet nuk përputhet me \"{}\"", query.trim());
                }
                for city in hits {
                    println!("{city}");
                }
            }
        }

        Ok(())
    }
}

fn style(config: &Config) -> Style {
    Style {
        units: config.units,
        theme: config.theme,
    }
}

fn weather_client(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => {
            tracing::debug!("Using API key from {API_KEY_ENV}");
            let mut config = config.clone();
            config.set_api_key(key);
            client_from_config(&config)
        }
        _ => client_from_config(config),
    }
}

/// Wrap a lookup failure so the user sees the localized alert first.
fn alert(err: WeatherError) -> anyhow::Error {
    let message = err.alert_message();
    anyhow::Error::new(err).context(message)
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Get one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    if !key.trim().is_empty() {
        config.set_api_key(key);
    } else if config.api_key().is_none() {
        anyhow::bail!("An API key is required.");
    }

    let all_units = vec![Units::Metric, Units::Imperial];
    let cursor = all_units.iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Units:", all_units)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read units")?;

    let themes = Theme::all().to_vec();
    let cursor = themes.iter().position(|t| *t == config.theme).unwrap_or(0);
    config.theme = Select::new("Theme:", themes)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read theme")?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(config: &Config, city: &str) -> anyhow::Result<()> {
    let client = weather_client(config)?;
    let style = style(config);

    let report = fetch_city(&client, city).await.map_err(alert)?;

    print!("{}", display::current_card(&report.current, style));
    println!();
    println!("Orët në vijim:");
    println!("  {}", display::hourly_row(&report.summary.hourly, style));
    println!();
    println!("Parashikimi 5-ditor:");
    print!("{}", display::daily_table(&report.summary.daily, style));

    Ok(())
}

async fn dashboard(config: &Config) -> anyhow::Result<()> {
    let client = weather_client(config)?;
    let style = style(config);
    let cities = config.favorites.dashboard_cities();

    let dashboard = load_dashboard(&client, &cities).await;

    if dashboard.report.conditions.is_empty() {
        println!("Nuk u morën të dhëna për asnjë qytet.");
        return Ok(());
    }

    print!("{}", display::fleet_cards(&dashboard.report, style));

    if let Some((forecast, summary)) = dashboard.forecast {
        println!();
        println!("Parashikimi për {}, {}:", forecast.city, forecast.country);
        println!("  {}", display::hourly_row(&summary.hourly, style));
        print!("{}", display::daily_table(&summary.daily, style));
    }

    Ok(())
}

fn favorites(config: &mut Config, action: FavoritesAction) -> anyhow::Result<()> {
    match action {
        FavoritesAction::List => {
            if config.favorites.is_empty() {
                println!("Asnjë qytet i preferuar. Paneli përdor qytetet e paracaktuara.");
            }
            for city in config.favorites.iter() {
                println!("{city}");
            }
        }
        FavoritesAction::Add { city } => {
            if city.trim().is_empty() {
                return Err(alert(WeatherError::InvalidInput));
            }
            if config.favorites.add(&city) {
                config.save()?;
                println!("{} u shtua në të preferuarat!", city.trim());
            } else {
                println!("{} është tashmë në të preferuarat.", city.trim());
            }
        }
        FavoritesAction::Remove { city } => {
            if config.favorites.remove(city.trim()) {
                config.save()?;
                println!("{} u hoq nga të preferuarat.", city.trim());
            } else {
                println!("{} nuk është në të preferuarat.", city.trim());
            }
        }
    }

    Ok(())
}
