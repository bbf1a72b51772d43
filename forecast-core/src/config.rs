use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::network::API_BASE_URL;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "WEATHERAPI_KEY";

pub const DEFAULT_FALLBACK_PLACE: &str = "Moscow";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// fallback_place = "Moscow"
/// forecast_days = 4
/// hourly_days = 2
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,

    /// Place queried when the device location cannot be determined.
    pub fallback_place: String,

    /// Overrides the weatherapi.com base URL (scheme, host and `/v1`).
    pub base_url: Option<String>,

    pub forecast_days: u32,
    pub hourly_days: u32,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            fallback_place: DEFAULT_FALLBACK_PLACE.to_string(),
            base_url: None,
            forecast_days: 4,
            hourly_days: 2,
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// API key from the environment, else from the config file.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(API_BASE_URL)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Path to the persisted user preferences (language).
    pub fn preferences_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("preferences.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_app_behaviour() {
        let cfg = Config::default();

        assert_eq!(cfg.fallback_place, "Moscow");
        assert_eq!(cfg.forecast_days, 4);
        assert_eq!(cfg.hourly_days, 2);
        assert_eq!(cfg.base_url(), "https://api.weatherapi.com/v1");
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("config.toml")).expect("load");

        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.fallback_place, DEFAULT_FALLBACK_PLACE);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = \"KEY\"\nfallback_place = \"Kazan\"\n").expect("write");

        let cfg = Config::load_from(&path).expect("load");

        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
        assert_eq!(cfg.fallback_place, "Kazan");
        assert_eq!(cfg.forecast_days, 4);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("SAVED".into());
        cfg.base_url = Some("http://localhost:8080/v1".into());
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.api_key.as_deref(), Some("SAVED"));
        assert_eq!(loaded.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "forecast_days = \"four\"").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
