use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, Coordinates, FilePreferences, FixedLocation, ForecastPresenter, LanguageService,
    LocationPlatform, LocationProvider, PresenterSettings, Strings, WeatherService, language,
    service_from_config,
};
use inquire::{Password, Text};

use crate::{location::PromptLocation, terminal::TerminalView};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather forecast for where you are")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherapi.com API key and fallback place.
    Configure,

    /// Show current conditions, daily and hourly forecast for your location.
    Show {
        /// Latitude of the current location; skips the location prompt.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude of the current location.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Do not determine the location; use the configured fallback place.
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        no_location: bool,

        /// Refresh once more after the initial load.
        #[arg(long)]
        refresh: bool,
    },

    /// Show current conditions for a place name or "<lat>,<lon>".
    Current {
        place: String,
    },

    /// Print the preferred language, or set it.
    Language {
        /// Two-letter language code, e.g. "en" or "ru".
        code: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { lat, lon, no_location, refresh } => {
                let platform: Arc<dyn LocationPlatform> = match (lat, lon) {
                    _ if no_location => Arc::new(FixedLocation::denied()),
                    (Some(lat), Some(lon)) => {
                        Arc::new(FixedLocation::granted(Coordinates::new(lat, lon)))
                    }
                    _ => Arc::new(PromptLocation::new()),
                };
                show(platform, refresh).await
            }
            Command::Current { place } => current(&place).await,
            Command::Language { code } => language_command(code.as_deref()),
        }
    }
}

fn language_service() -> anyhow::Result<LanguageService> {
    let prefs = FilePreferences::open(Config::preferences_file_path()?)?;
    Ok(LanguageService::new(Arc::new(prefs), language::platform_language_from_env()))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("weatherapi.com API key:")
        .without_confirmation()
        .prompt()
        .context("API key prompt was cancelled")?;
    let fallback_place = Text::new("Place to use when location is unavailable:")
        .with_default(&config.fallback_place)
        .prompt()
        .context("Fallback place prompt was cancelled")?;

    config.set_api_key(api_key.trim().to_string());
    config.fallback_place = fallback_place.trim().to_string();
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(platform: Arc<dyn LocationPlatform>, refresh: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let weather = service_from_config(&config)?;
    let languages = language_service()?;
    let strings = Strings::for_language(languages.weather_api_language_code());

    let presenter = ForecastPresenter::new(
        weather,
        LocationProvider::new(platform),
        languages,
        PresenterSettings::from(&config),
    );
    let view = Arc::new(TerminalView::new(strings));
    presenter.attach_view(view.clone());

    presenter.view_did_load().await;

    if refresh {
        view.begin_refreshing();
        presenter.did_pull_to_refresh().await;
    }

    presenter.detach_view();
    Ok(())
}

async fn current(place: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let weather = service_from_config(&config)?;
    let language = language_service()?.weather_api_language_code();

    let current = weather
        .get_current_weather(place, language)
        .await
        .with_context(|| format!("Failed to get current weather for '{place}'"))?;

    crate::terminal::print_current(&current, Strings::for_language(language));
    Ok(())
}

fn language_command(code: Option<&str>) -> anyhow::Result<()> {
    let languages = language_service()?;

    if let Some(code) = code {
        languages.set_current_language(code.trim())?;
    }

    println!(
        "Language: {} (weather API: {})",
        languages.current_language(),
        languages.weather_api_language_code()
    );
    Ok(())
}
