//! Core library for the `forecast` app.
//!
//! This crate defines:
//! - A generic HTTP request executor and the weatherapi.com service on top of it
//! - Device location acquisition behind a platform trait
//! - Language resolution with persisted preferences
//! - The forecast presenter that drives a [`ForecastView`]
//!
//! It is used by `forecast-cli`, but any front end implementing
//! [`ForecastView`] and [`LocationPlatform`] can drive it.

pub mod config;
pub mod error;
pub mod language;
pub mod location;
pub mod model;
pub mod network;
pub mod preferences;
pub mod presenter;
pub mod provider;
pub mod sections;
pub mod strings;
pub mod timeline;
pub mod view;

pub use config::Config;
pub use error::{LocationError, NetworkError};
pub use language::LanguageService;
pub use location::{Authorization, FixedLocation, LocationPlatform, LocationProvider};
pub use model::{
    Condition, Coordinates, CurrentConditions, CurrentWeatherResponse, DaySummary, ForecastDay,
    ForecastResponse, HourForecast, InvalidCoordinates, LocationInfo, WeatherItem,
};
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use presenter::{ForecastPresenter, PresenterSettings, RefreshPhase};
pub use provider::{WeatherService, service_from_config};
pub use strings::Strings;
pub use view::ForecastView;
