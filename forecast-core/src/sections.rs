use crate::{
    model::{ForecastResponse, WeatherItem},
    strings::Strings,
};

/// Metric tiles shown under the forecast, rebuilt on every fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalSections {
    pub uv_and_pressure: Vec<WeatherItem>,
    pub precipitation: Vec<WeatherItem>,
    pub wind: Vec<WeatherItem>,
}

impl AdditionalSections {
    /// Built from current conditions and day zero; a missing day zero
    /// reports 0% precipitation.
    pub fn from_forecast(forecast: &ForecastResponse, strings: &Strings) -> Self {
        let current = &forecast.current;
        let (rain, snow) = forecast
            .today()
            .map(|today| (today.day.chance_of_rain_pct, today.day.chance_of_snow_pct))
            .unwrap_or((0, 0));

        Self {
            uv_and_pressure: vec![
                WeatherItem::new(strings.uv_index, current.uv_index.to_string(), "sun.max"),
                WeatherItem::new(
                    strings.pressure,
                    format!("{}{}", current.pressure_mb, strings.millibars),
                    "barometer",
                ),
            ],
            precipitation: vec![
                WeatherItem::new(strings.chance_of_rain, format!("{rain}%"), "cloud.rain"),
                WeatherItem::new(strings.chance_of_snow, format!("{snow}%"), "cloud.snow"),
            ],
            wind: vec![
                WeatherItem::new(
                    strings.wind_speed,
                    format!("{}{}", current.wind_kph, strings.km_h),
                    "wind",
                ),
                WeatherItem::new(
                    strings.wind_direction,
                    format!("{}°", current.wind_degree),
                    "location.north",
                ),
            ],
        }
    }
}
