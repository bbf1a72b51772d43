use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A resolved device position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Place string understood by the weather API: `"<lat>,<lon>"`.
    pub fn place(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.place())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates '{0}', expected \"<lat>,<lon>\"")]
pub struct InvalidCoordinates(pub String);

impl FromStr for Coordinates {
    type Err = InvalidCoordinates;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidCoordinates(s.to_string());
        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid());
        }

        Ok(Self { latitude, longitude })
    }
}

/// Root object of `/forecast.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub location: LocationInfo,
    pub current: CurrentConditions,
    pub forecast: Forecast,
}

impl ForecastResponse {
    pub fn days(&self) -> &[ForecastDay] {
        &self.forecast.days
    }

    /// Day zero of the forecast, treated as "today".
    pub fn today(&self) -> Option<&ForecastDay> {
        self.forecast.days.first()
    }
}

/// Root object of `/current.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    pub location: LocationInfo,
    pub current: CurrentConditions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(rename = "forecastday")]
    pub days: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "tz_id")]
    pub timezone_id: String,
    #[serde(rename = "localtime_epoch")]
    pub local_time_epoch: i64,
    #[serde(rename = "localtime")]
    pub local_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub last_updated_epoch: i64,
    pub temp_c: f64,
    #[serde(with = "int_bool")]
    pub is_day: bool,
    pub condition: Condition,
    pub wind_kph: f64,
    pub wind_degree: i32,
    pub pressure_mb: f64,
    #[serde(rename = "uv")]
    pub uv_index: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Scheme-relative, e.g. `//cdn.weatherapi.com/weather/64x64/day/116.png`.
    #[serde(rename = "icon")]
    pub icon_path: String,
}

impl Condition {
    pub fn icon_url(&self) -> String {
        if self.icon_path.starts_with("//") {
            format!("https:{}", self.icon_path)
        } else {
            self.icon_path.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// `yyyy-MM-dd`
    #[serde(rename = "date")]
    pub date_string: String,
    pub date_epoch: i64,
    pub day: DaySummary,
    #[serde(rename = "hour")]
    pub hours: Vec<HourForecast>,
}

impl ForecastDay {
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date_string, "%Y-%m-%d").ok()
    }

    /// "Today" when the date equals `today`, otherwise the abbreviated weekday.
    /// Falls back to the raw date string when it cannot be parsed.
    pub fn day_label(&self, today: NaiveDate) -> String {
        match self.date() {
            Some(date) if date == today => "Today".to_string(),
            Some(date) => date.format("%a").to_string(),
            None => self.date_string.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    #[serde(rename = "maxtemp_c")]
    pub max_temp_c: f64,
    #[serde(rename = "mintemp_c")]
    pub min_temp_c: f64,
    #[serde(rename = "avgtemp_c")]
    pub avg_temp_c: f64,
    #[serde(rename = "daily_will_it_rain", with = "int_bool")]
    pub will_rain: bool,
    #[serde(rename = "daily_chance_of_rain")]
    pub chance_of_rain_pct: u8,
    #[serde(rename = "daily_will_it_snow", with = "int_bool")]
    pub will_snow: bool,
    #[serde(rename = "daily_chance_of_snow")]
    pub chance_of_snow_pct: u8,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourForecast {
    /// UTC Unix timestamp.
    pub time_epoch: i64,
    #[serde(rename = "time")]
    pub time_string: String,
    pub temp_c: f64,
    #[serde(with = "int_bool")]
    pub is_day: bool,
    pub condition: Condition,
    #[serde(rename = "cloud")]
    pub cloud_pct: u8,
    #[serde(rename = "feelslike_c")]
    pub feels_like_c: f64,
    #[serde(rename = "heatindex_c")]
    pub heat_index_c: f64,
    #[serde(rename = "will_it_rain", with = "int_bool")]
    pub will_rain: bool,
    #[serde(rename = "chance_of_rain")]
    pub chance_of_rain_pct: u8,
    #[serde(rename = "will_it_snow", with = "int_bool")]
    pub will_snow: bool,
    #[serde(rename = "chance_of_snow")]
    pub chance_of_snow_pct: u8,
}

impl HourForecast {
    pub fn instant(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.time_epoch, 0).unwrap_or_default()
    }
}

/// One row of a metrics tile (UV, pressure, precipitation, wind).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeatherItem {
    pub title: String,
    pub value: String,
    pub icon_name: String,
}

impl WeatherItem {
    pub fn new(title: impl Into<String>, value: impl Into<String>, icon_name: impl Into<String>) -> Self {
        Self { title: title.into(), value: value.into(), icon_name: icon_name.into() }
    }
}

/// The API encodes flags as `0`/`1`.
mod int_bool {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Int(i64),
        Bool(bool),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Flag::deserialize(deserializer)? {
            Flag::Int(v) => v != 0,
            Flag::Bool(v) => v,
        })
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{Value, json};

    pub fn condition(text: &str) -> Value {
        json!({ "text": text, "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png", "code": 1003 })
    }

    pub fn hour(epoch: i64, time: &str, temp: f64) -> Value {
        json!({
            "time_epoch": epoch,
            "time": time,
            "temp_c": temp,
            "is_day": 1,
            "condition": condition("Partly cloudy"),
            "wind_kph": 9.4,
            "cloud": 50,
            "feelslike_c": temp - 1.0,
            "heatindex_c": temp + 0.5,
            "will_it_rain": 0,
            "chance_of_rain": 10,
            "will_it_snow": 0,
            "chance_of_snow": 0
        })
    }

    pub fn day(date: &str, epoch: i64, hours: Vec<Value>) -> Value {
        json!({
            "date": date,
            "date_epoch": epoch,
            "day": {
                "maxtemp_c": 24.1,
                "mintemp_c": 13.6,
                "avgtemp_c": 18.9,
                "daily_will_it_rain": 1,
                "daily_chance_of_rain": 83,
                "daily_will_it_snow": 0,
                "daily_chance_of_snow": 0,
                "condition": condition("Patchy rain nearby")
            },
            "hour": hours
        })
    }

    pub fn current() -> Value {
        json!({
            "last_updated_epoch": 1749562200,
            "last_updated": "2025-06-10 16:30",
            "temp_c": 21.3,
            "is_day": 1,
            "condition": condition("Partly cloudy"),
            "wind_kph": 14.4,
            "wind_degree": 245,
            "pressure_mb": 1013.0,
            "uv": 5.2
        })
    }

    pub fn location() -> Value {
        json!({
            "name": "Moscow",
            "region": "Moscow City",
            "country": "Russia",
            "lat": 55.7522,
            "lon": 37.6156,
            "tz_id": "Europe/Moscow",
            "localtime_epoch": 1749562380,
            "localtime": "2025-06-10 16:33"
        })
    }

    pub fn forecast(days: Vec<Value>) -> Value {
        json!({
            "location": location(),
            "current": current(),
            "forecast": { "forecastday": days }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_day(date: &str) -> ForecastDay {
        serde_json::from_value(fixtures::day(date, 0, vec![])).expect("fixture should decode")
    }

    #[test]
    fn decodes_forecast_with_snake_case_fields() {
        let json = fixtures::forecast(vec![fixtures::day(
            "2025-06-10",
            1749513600,
            vec![fixtures::hour(1749513600, "2025-06-10 00:00", 15.0)],
        )]);

        let parsed: ForecastResponse = serde_json::from_value(json).expect("should decode");

        assert_eq!(parsed.location.timezone_id, "Europe/Moscow");
        assert_eq!(parsed.current.wind_degree, 245);
        assert!(parsed.current.is_day);
        assert!((parsed.current.uv_index - 5.2).abs() < f64::EPSILON);

        let today = parsed.today().expect("one day");
        assert!(today.day.will_rain);
        assert!(!today.day.will_snow);
        assert_eq!(today.day.chance_of_rain_pct, 83);
        assert_eq!(today.hours.len(), 1);
        assert_eq!(today.hours[0].cloud_pct, 50);
    }

    #[test]
    fn icon_url_prefixes_https() {
        let condition = Condition { text: "Sunny".into(), icon_path: "//cdn.example/sun.png".into() };
        assert_eq!(condition.icon_url(), "https://cdn.example/sun.png");
    }

    #[test]
    fn coordinates_render_as_place_string() {
        assert_eq!(Coordinates::new(55.75, 37.61).place(), "55.75,37.61");
    }

    #[test]
    fn coordinates_parse_from_place_string() {
        assert_eq!("55.75, 37.61".parse::<Coordinates>(), Ok(Coordinates::new(55.75, 37.61)));
        assert_eq!("-33.87,151.21".parse::<Coordinates>(), Ok(Coordinates::new(-33.87, 151.21)));
    }

    #[test]
    fn coordinates_reject_garbage_and_out_of_range() {
        assert!("Moscow".parse::<Coordinates>().is_err());
        assert!("91,0".parse::<Coordinates>().is_err());
        assert!("0,181".parse::<Coordinates>().is_err());
        assert!("1,two".parse::<Coordinates>().is_err());
    }

    #[test]
    fn day_label_is_today_for_current_date() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).expect("valid date");
        assert_eq!(sample_day("2025-06-10").day_label(today), "Today");
    }

    #[test]
    fn day_label_is_weekday_for_other_dates() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).expect("valid date");
        assert_eq!(sample_day("2025-06-11").day_label(today), "Wed");
        assert_eq!(sample_day("2025-06-09").day_label(today), "Mon");
    }

    #[test]
    fn day_label_falls_back_to_raw_string() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).expect("valid date");
        assert_eq!(sample_day("tomorrow").day_label(today), "tomorrow");
    }

    #[test]
    fn hour_instant_is_utc_epoch() {
        let hour: HourForecast =
            serde_json::from_value(fixtures::hour(1749567600, "2025-06-10 18:00", 20.0))
                .expect("fixture should decode");
        assert_eq!(hour.instant().to_rfc3339(), "2025-06-10T15:00:00+00:00");
    }
}
