use std::{fmt::Debug, sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{
    Config,
    error::NetworkError,
    model::{Coordinates, CurrentWeatherResponse, ForecastResponse, HourForecast},
    network::NetworkClient,
    provider::weatherapi::WeatherApiService,
};

pub mod weatherapi;

/// Days requested when a forecast is asked for by coordinates.
pub const DEFAULT_FORECAST_DAYS: u32 = 3;

/// Weather operations the presenter depends on.
///
/// Every call is a single attempt; transport failures are returned unchanged.
#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    async fn get_forecast(
        &self,
        place: &str,
        days: u32,
        language: &str,
    ) -> Result<ForecastResponse, NetworkError>;

    async fn get_current_weather(
        &self,
        place: &str,
        language: &str,
    ) -> Result<CurrentWeatherResponse, NetworkError>;

    async fn get_forecast_at(
        &self,
        coordinates: Coordinates,
        language: &str,
    ) -> Result<ForecastResponse, NetworkError> {
        self.get_forecast(&coordinates.place(), DEFAULT_FORECAST_DAYS, language).await
    }

    /// All hours of the next `days` days, day by day, hour by hour.
    async fn get_hourly_forecast(
        &self,
        place: &str,
        days: u32,
        language: &str,
    ) -> Result<Vec<HourForecast>, NetworkError> {
        let forecast = self.get_forecast(place, days, language).await?;
        Ok(forecast.forecast.days.into_iter().flat_map(|day| day.hours).collect())
    }
}

/// Construct the weatherapi.com service from config.
pub fn service_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherService>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for weatherapi.com.\n\
             Hint: run `forecast configure` or set WEATHERAPI_KEY."
        )
    })?;

    let mut http = reqwest::Client::builder();
    if let Some(secs) = config.request_timeout_secs {
        http = http.timeout(Duration::from_secs(secs));
    }
    let http = http.build()?;

    let network = NetworkClient::with_client(config.base_url(), http);
    Ok(Arc::new(WeatherApiService::with_client(api_key, network)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_from_config_errors_when_missing_api_key() {
        let cfg = Config { api_key: None, ..Config::default() };
        if std::env::var(crate::config::API_KEY_ENV).is_ok() {
            return;
        }

        let err = service_from_config(&cfg).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("Hint: run `forecast configure`"));
    }

    #[test]
    fn service_from_config_works_when_key_present() {
        let cfg = Config { api_key: Some("KEY".into()), request_timeout_secs: Some(5), ..Config::default() };

        assert!(service_from_config(&cfg).is_ok());
    }
}
