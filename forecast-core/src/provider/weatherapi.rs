use async_trait::async_trait;

use crate::{
    error::NetworkError,
    model::{CurrentWeatherResponse, ForecastResponse},
    network::{Endpoint, NetworkClient},
};

use super::WeatherService;

/// weatherapi.com client.
#[derive(Clone)]
pub struct WeatherApiService {
    api_key: String,
    network: NetworkClient,
}

impl WeatherApiService {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(api_key, NetworkClient::new())
    }

    pub fn with_client(api_key: impl Into<String>, network: NetworkClient) -> Self {
        Self { api_key: api_key.into(), network }
    }

    fn endpoint(&self, path: &str, place: &str, language: &str) -> Endpoint {
        Endpoint::get(path)
            .query("key", self.api_key.as_str())
            .query("q", place)
            .query("aqi", "no")
            .query("lang", language)
            .header("Content-Type", "application/json")
    }

    pub fn forecast_endpoint(&self, place: &str, days: u32, language: &str) -> Endpoint {
        self.endpoint("/forecast.json", place, language).query("days", days.to_string())
    }

    pub fn current_endpoint(&self, place: &str, language: &str) -> Endpoint {
        self.endpoint("/current.json", place, language)
    }
}

impl std::fmt::Debug for WeatherApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiService")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.network.base_url())
            .finish()
    }
}

#[async_trait]
impl WeatherService for WeatherApiService {
    async fn get_forecast(
        &self,
        place: &str,
        days: u32,
        language: &str,
    ) -> Result<ForecastResponse, NetworkError> {
        self.network.request(&self.forecast_endpoint(place, days, language)).await
    }

    async fn get_current_weather(
        &self,
        place: &str,
        language: &str,
    ) -> Result<CurrentWeatherResponse, NetworkError> {
        self.network.request(&self.current_endpoint(place, language)).await
    }
}
