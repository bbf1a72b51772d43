//! Forecast screen presenter.
//!
//! Every load, initial or pull-to-refresh, starts by resolving the device
//! location and then runs the fetch pipeline:
//!
//! 1. daily forecast: current-day header, day list and metric sections
//! 2. hourly forecast: filtered to the rest of today and all of tomorrow
//!
//! Only one cycle runs at a time. A cycle always ends with exactly one
//! `end_refreshing`, whether it succeeds, fails or is dropped.

use std::sync::Arc;

use chrono::Local;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::{
    config::{Config, DEFAULT_FALLBACK_PLACE},
    error::NetworkError,
    language::LanguageService,
    location::LocationProvider,
    model::ForecastResponse,
    provider::WeatherService,
    sections::AdditionalSections,
    strings::Strings,
    timeline,
    view::ForecastView,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenterSettings {
    pub fallback_place: String,
    pub forecast_days: u32,
    pub hourly_days: u32,
}

impl Default for PresenterSettings {
    fn default() -> Self {
        Self { fallback_place: DEFAULT_FALLBACK_PLACE.to_string(), forecast_days: 4, hourly_days: 2 }
    }
}

impl From<&Config> for PresenterSettings {
    fn from(config: &Config) -> Self {
        Self {
            fallback_place: config.fallback_place.clone(),
            forecast_days: config.forecast_days,
            hourly_days: config.hourly_days,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    Idle,
    /// Locating or fetching.
    Refreshing,
    /// `end_refreshing` is being delivered.
    Completing,
}

#[derive(Debug)]
struct State {
    current_place: String,
    phase: RefreshPhase,
    forecast: Option<ForecastResponse>,
    error_message: Option<String>,
}

pub struct ForecastPresenter {
    weather: Arc<dyn WeatherService>,
    location: LocationProvider,
    language: LanguageService,
    settings: PresenterSettings,
    view: Mutex<Option<Arc<dyn ForecastView>>>,
    state: Mutex<State>,
}

impl ForecastPresenter {
    pub fn new(
        weather: Arc<dyn WeatherService>,
        location: LocationProvider,
        language: LanguageService,
        settings: PresenterSettings,
    ) -> Self {
        let state = State {
            current_place: settings.fallback_place.clone(),
            phase: RefreshPhase::Idle,
            forecast: None,
            error_message: None,
        };

        Self {
            weather,
            location,
            language,
            settings,
            view: Mutex::new(None),
            state: Mutex::new(state),
        }
    }

    pub fn attach_view(&self, view: Arc<dyn ForecastView>) {
        *self.view.lock() = Some(view);
    }

    /// Later emissions become no-ops.
    pub fn detach_view(&self) {
        self.view.lock().take();
    }

    pub fn current_place(&self) -> String {
        self.state.lock().current_place.clone()
    }

    /// Last successfully fetched daily forecast.
    pub fn forecast(&self) -> Option<ForecastResponse> {
        self.state.lock().forecast.clone()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.lock().error_message.clone()
    }

    pub fn refresh_phase(&self) -> RefreshPhase {
        self.state.lock().phase
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh_phase() != RefreshPhase::Idle
    }

    /// Initial load: show loading, locate, fetch.
    pub async fn view_did_load(&self) {
        let Some(cycle) = self.begin_cycle() else {
            debug!("load requested while a refresh is running; ignoring");
            return;
        };

        self.emit(|view| view.show_loading());
        self.locate_and_fetch(cycle).await;
    }

    /// No-op while a cycle is already running.
    pub async fn did_pull_to_refresh(&self) {
        let Some(cycle) = self.begin_cycle() else {
            debug!("pull-to-refresh ignored; refresh already in flight");
            return;
        };

        self.locate_and_fetch(cycle).await;
    }

    fn begin_cycle(&self) -> Option<Cycle<'_>> {
        let mut state = self.state.lock();
        if state.phase != RefreshPhase::Idle {
            return None;
        }
        state.phase = RefreshPhase::Refreshing;
        Some(Cycle { presenter: self, done: false })
    }

    async fn locate_and_fetch(&self, cycle: Cycle<'_>) {
        match self.location.request_location().await {
            Ok(coordinates) => {
                let place = coordinates.place();
                info!(%place, "using device location");
                self.state.lock().current_place = place;
            }
            Err(err) => {
                let message = self.strings().location_failed(&err);
                info!(fallback = %self.settings.fallback_place, error = %err, "using fallback place");
                {
                    let mut state = self.state.lock();
                    state.current_place = self.settings.fallback_place.clone();
                    state.error_message = Some(message.clone());
                }
                self.emit(|view| view.display_error(&message));
            }
        }

        self.fetch(cycle).await;
    }

    async fn fetch(&self, cycle: Cycle<'_>) {
        self.emit(|view| {
            if !view.is_refreshing() {
                view.show_loading();
            }
        });

        let language = self.language.weather_api_language_code();
        let strings = Strings::for_language(language);
        let place = self.current_place();

        match self.run_pipeline(&place, language, strings).await {
            Ok(()) => {
                self.emit(|view| view.hide_loading());
                cycle.complete();
            }
            Err(err) => {
                warn!(%place, error = %err, "forecast fetch failed");
                self.emit(|view| view.hide_loading());
                cycle.complete();

                let message = strings.forecast_failed(&err);
                self.state.lock().error_message = Some(message.clone());
                self.emit(|view| view.display_error(&message));
            }
        }
    }

    /// Daily then hourly; whatever was displayed before a failure stays.
    async fn run_pipeline(
        &self,
        place: &str,
        language: &str,
        strings: &Strings,
    ) -> Result<(), NetworkError> {
        let forecast = self.weather.get_forecast(place, self.settings.forecast_days, language).await?;

        let sections = AdditionalSections::from_forecast(&forecast, strings);
        self.emit(|view| {
            view.display_current_day_forecast(&forecast);
            view.display_daily_forecast(forecast.days());
            view.display_additional_sections(
                &sections.uv_and_pressure,
                &sections.precipitation,
                &sections.wind,
            );
        });
        self.state.lock().forecast = Some(forecast);

        let hours =
            self.weather.get_hourly_forecast(place, self.settings.hourly_days, language).await?;
        let hours = timeline::current_and_next_day(hours, &Local::now());
        debug!(count = hours.len(), "hourly entries in window");
        self.emit(|view| view.display_hourly_forecast(&hours));

        Ok(())
    }

    fn strings(&self) -> &'static Strings {
        Strings::for_language(self.language.weather_api_language_code())
    }

    fn emit(&self, f: impl FnOnce(&dyn ForecastView)) {
        let view = self.view.lock().clone();
        if let Some(view) = view {
            f(view.as_ref());
        }
    }
}

impl std::fmt::Debug for ForecastPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastPresenter")
            .field("weather", &self.weather)
            .field("settings", &self.settings)
            .field("state", &*self.state.lock())
            .finish()
    }
}

/// Ownership of the single refresh slot. Releasing it, explicitly or on
/// drop, emits `end_refreshing` once and returns the phase to idle.
struct Cycle<'a> {
    presenter: &'a ForecastPresenter,
    done: bool,
}

impl Cycle<'_> {
    fn complete(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.done {
            return;
        }
        self.done = true;

        self.presenter.state.lock().phase = RefreshPhase::Completing;
        self.presenter.emit(|view| view.end_refreshing());
        self.presenter.state.lock().phase = RefreshPhase::Idle;
    }
}

impl Drop for Cycle<'_> {
    fn drop(&mut self) {
        self.release();
    }
}
