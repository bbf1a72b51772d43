use std::sync::Arc;

use anyhow::Result;

use crate::preferences::PreferenceStore;

/// Key the selected language is persisted under.
pub const LANGUAGE_KEY: &str = "appLanguage";

const DEFAULT_LANGUAGE: &str = "en";

/// Resolves the user's language and the code sent to the weather API.
#[derive(Clone)]
pub struct LanguageService {
    store: Arc<dyn PreferenceStore>,
    platform_preferred: Option<String>,
}

impl LanguageService {
    /// `platform_preferred` is the OS-level preferred language, if any
    /// (e.g. `"ru-RU"` or `"ru_RU.UTF-8"`).
    pub fn new(store: Arc<dyn PreferenceStore>, platform_preferred: Option<String>) -> Self {
        Self { store, platform_preferred }
    }

    /// Persisted choice, else the platform preference, else `"en"`.
    pub fn current_language(&self) -> String {
        if let Some(stored) = self.store.get(LANGUAGE_KEY) {
            return stored;
        }

        self.platform_preferred
            .as_deref()
            .map(|lang| lang.chars().take(2).collect::<String>())
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    }

    pub fn set_current_language(&self, code: &str) -> Result<()> {
        self.store.set(LANGUAGE_KEY, code)
    }

    /// Only Russian is passed through; everything else is requested in English.
    pub fn weather_api_language_code(&self) -> &'static str {
        match self.current_language().as_str() {
            "ru" => "ru",
            _ => "en",
        }
    }
}

impl std::fmt::Debug for LanguageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageService")
            .field("current_language", &self.current_language())
            .finish()
    }
}

/// Raw preferred locale from `LC_ALL`, then `LANG` (e.g. `ru_RU.UTF-8`).
pub fn platform_language_from_env() -> Option<String> {
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryPreferences;

    fn service(stored: Option<&str>, platform: Option<&str>) -> LanguageService {
        let store = Arc::new(MemoryPreferences::new());
        if let Some(code) = stored {
            store.set(LANGUAGE_KEY, code).expect("memory store");
        }
        LanguageService::new(store, platform.map(str::to_string))
    }

    #[test]
    fn stored_language_wins() {
        assert_eq!(service(Some("ru"), Some("de-DE")).current_language(), "ru");
    }

    #[test]
    fn falls_back_to_platform_prefix() {
        assert_eq!(service(None, Some("de-DE")).current_language(), "de");
        assert_eq!(service(None, Some("ru_RU.UTF-8")).current_language(), "ru");
    }

    #[test]
    fn falls_back_to_english() {
        assert_eq!(service(None, None).current_language(), "en");
        assert_eq!(service(None, Some("")).current_language(), "en");
    }

    #[test]
    fn setter_persists_immediately() {
        let store = Arc::new(MemoryPreferences::new());
        let languages = LanguageService::new(store.clone(), None);

        languages.set_current_language("ru").expect("set");

        assert_eq!(store.get(LANGUAGE_KEY).as_deref(), Some("ru"));
        assert_eq!(languages.current_language(), "ru");
    }

    #[test]
    fn api_code_is_ru_only_for_exact_ru() {
        assert_eq!(service(Some("ru"), None).weather_api_language_code(), "ru");
        assert_eq!(service(None, Some("ru-RU")).weather_api_language_code(), "ru");
        assert_eq!(service(Some("RU"), None).weather_api_language_code(), "en");
        assert_eq!(service(Some("uk"), None).weather_api_language_code(), "en");
        assert_eq!(service(Some("russian"), None).weather_api_language_code(), "en");
        assert_eq!(service(None, None).weather_api_language_code(), "en");
    }
}
