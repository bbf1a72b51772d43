//! User-facing text in the languages the weather API is queried in.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    pub uv_index: &'static str,
    pub pressure: &'static str,
    pub millibars: &'static str,
    pub chance_of_rain: &'static str,
    pub chance_of_snow: &'static str,
    pub wind_speed: &'static str,
    pub wind_direction: &'static str,
    pub km_h: &'static str,
    pub max: &'static str,
    pub min: &'static str,
    forecast_failed: &'static str,
    location_failed: &'static str,
}

const EN: Strings = Strings {
    uv_index: "UV index",
    pressure: "Pressure",
    millibars: " mb",
    chance_of_rain: "Chance of rain",
    chance_of_snow: "Chance of snow",
    wind_speed: "Wind speed",
    wind_direction: "Wind direction",
    km_h: " km/h",
    max: "Max",
    min: "min",
    forecast_failed: "Unable to get the current weather forecast. Error: ",
    location_failed: "An error occurred while determining location: ",
};

const RU: Strings = Strings {
    uv_index: "УФ-индекс",
    pressure: "Давление",
    millibars: " мбар",
    chance_of_rain: "Вероятность дождя",
    chance_of_snow: "Вероятность снега",
    wind_speed: "Скорость ветра",
    wind_direction: "Направление ветра",
    km_h: " км/ч",
    max: "Макс",
    min: "мин",
    forecast_failed: "Невозможно получить текущий прогноз погоды. Ошибка: ",
    location_failed: "Возникла ошибка при определении геолокации: ",
};

impl Strings {
    /// Table for a weather API language code; unknown codes get English.
    pub fn for_language(code: &str) -> &'static Strings {
        match code {
            "ru" => &RU,
            _ => &EN,
        }
    }

    pub fn forecast_failed(&self, error: impl Display) -> String {
        format!("{}{error}", self.forecast_failed)
    }

    pub fn location_failed(&self, error: impl Display) -> String {
        format!("{}{error}", self.location_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_uses_english() {
        assert_eq!(Strings::for_language("de"), &EN);
    }

    #[test]
    fn templates_embed_the_error() {
        let msg = Strings::for_language("en").forecast_failed("server error (status 500)");
        assert_eq!(msg, "Unable to get the current weather forecast. Error: server error (status 500)");

        let msg = Strings::for_language("ru").location_failed("denied");
        assert!(msg.starts_with("Возникла ошибка"));
        assert!(msg.ends_with("denied"));
    }
}
