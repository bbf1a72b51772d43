use crate::model::{ForecastDay, ForecastResponse, HourForecast, WeatherItem};

/// What the presenter publishes to the UI.
///
/// Calls arrive from the presenter's task, one at a time.
pub trait ForecastView: Send + Sync {
    fn show_loading(&self);
    fn hide_loading(&self);
    fn end_refreshing(&self);

    /// Whether the UI's own pull-to-refresh spinner is active.
    fn is_refreshing(&self) -> bool;

    fn display_error(&self, message: &str);
    fn display_current_day_forecast(&self, forecast: &ForecastResponse);
    fn display_daily_forecast(&self, days: &[ForecastDay]);
    fn display_hourly_forecast(&self, hours: &[HourForecast]);
    fn display_additional_sections(
        &self,
        uv_and_pressure: &[WeatherItem],
        precipitation: &[WeatherItem],
        wind: &[WeatherItem],
    );
}
