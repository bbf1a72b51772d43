//! Plain-text rendering of the forecast screen.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Local, NaiveDate};
use forecast_core::{
    CurrentWeatherResponse, ForecastDay, ForecastResponse, ForecastView, HourForecast, Strings,
    WeatherItem,
};
use tracing::debug;

pub struct TerminalView {
    strings: &'static Strings,
    refreshing: AtomicBool,
}

impl TerminalView {
    pub fn new(strings: &'static Strings) -> Self {
        Self { strings, refreshing: AtomicBool::new(false) }
    }

    /// Mirrors the UI's pull-to-refresh spinner being shown.
    pub fn begin_refreshing(&self) {
        self.refreshing.store(true, Ordering::SeqCst);
    }
}

impl ForecastView for TerminalView {
    fn show_loading(&self) {
        eprintln!("Loading forecast...");
    }

    fn hide_loading(&self) {
        debug!("loading finished");
    }

    fn end_refreshing(&self) {
        self.refreshing.store(false, Ordering::SeqCst);
    }

    fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::SeqCst)
    }

    fn display_error(&self, message: &str) {
        eprintln!("error: {message}");
    }

    fn display_current_day_forecast(&self, forecast: &ForecastResponse) {
        println!();
        println!("{}", header_line(forecast));
        if let Some(today) = forecast.today() {
            println!(
                "{}.: {:.0}°C, {}.: {:.0}°C",
                self.strings.max, today.day.max_temp_c, self.strings.min, today.day.min_temp_c
            );
        }
    }

    fn display_daily_forecast(&self, days: &[ForecastDay]) {
        println!();
        let today = Local::now().date_naive();
        for day in days {
            println!("{}", daily_line(day, today));
        }
    }

    fn display_hourly_forecast(&self, hours: &[HourForecast]) {
        println!();
        for hour in hours {
            let time = hour.instant().with_timezone(&Local).format("%H:%M");
            println!("{time}  {:>4.0}°C  {}", hour.temp_c, hour.condition.text);
        }
    }

    fn display_additional_sections(
        &self,
        uv_and_pressure: &[WeatherItem],
        precipitation: &[WeatherItem],
        wind: &[WeatherItem],
    ) {
        for section in [uv_and_pressure, precipitation, wind] {
            println!();
            for item in section {
                println!("{}: {}", item.title, item.value);
            }
        }
    }
}

fn header_line(forecast: &ForecastResponse) -> String {
    format!(
        "{}, {}  {:.0}°C  {}",
        forecast.location.name,
        forecast.location.country,
        forecast.current.temp_c,
        forecast.current.condition.text
    )
}

fn daily_line(day: &ForecastDay, today: NaiveDate) -> String {
    format!(
        "{:<6} {:.0}°/{:.0}°  {}",
        day.day_label(today),
        day.day.min_temp_c,
        day.day.max_temp_c,
        day.day.condition.text
    )
}

pub fn print_current(current: &CurrentWeatherResponse, strings: &Strings) {
    let conditions = &current.current;
    println!(
        "{}, {}  {:.0}°C  {}",
        current.location.name, current.location.country, conditions.temp_c, conditions.condition.text
    );
    println!("{}: {}", strings.uv_index, conditions.uv_index);
    println!("{}: {}{}", strings.pressure, conditions.pressure_mb, strings.millibars);
    println!("{}: {}{}", strings.wind_speed, conditions.wind_kph, strings.km_h);
    println!("{}: {}°", strings.wind_direction, conditions.wind_degree);
}
