//! Small key-value store for user preferences that must survive restarts.

use std::{collections::BTreeMap, fs, path::PathBuf};

use anyhow::{Context, Result};
use parking_lot::Mutex;

pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, persisting it before returning.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept in memory only.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences stored as a flat TOML table on disk.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FilePreferences {
    /// Open the store at `path`; a missing file means no preferences yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse preferences file: {}", path.display()))?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values: Mutex::new(values) })
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(values).context("Failed to serialize preferences")?;
        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write preferences file: {}", self.path.display()))
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrips_values() {
        let store = MemoryPreferences::new();
        assert_eq!(store.get("appLanguage"), None);

        store.set("appLanguage", "ru").expect("set should succeed");
        assert_eq!(store.get("appLanguage").as_deref(), Some("ru"));
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("preferences.toml");

        let store = FilePreferences::open(&path).expect("open empty store");
        assert_eq!(store.get("appLanguage"), None);
        store.set("appLanguage", "ru").expect("set should persist");

        let reopened = FilePreferences::open(&path).expect("reopen store");
        assert_eq!(reopened.get("appLanguage").as_deref(), Some("ru"));
    }

    #[test]
    fn file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "this is = = not toml").expect("write fixture");

        let err = FilePreferences::open(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse preferences file"));
    }
}
