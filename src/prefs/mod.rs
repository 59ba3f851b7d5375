//! Persisted language preference
//!
//! Backends:
//! - Browser: `localStorage` (see the `web` module)
//! - Native: a small TOML file under the platform config directory
//! - Memory: process-local, used by tests

use crate::core::Result;
use std::cell::RefCell;

/// Trait for stores holding the selected language code
pub trait PreferenceStore {
    /// Read the saved code
    fn load(&self) -> Result<Option<String>>;

    /// Persist `code`, replacing any previous value
    fn save(&self, code: &str) -> Result<()>;

    /// Saved code; storage failures read as "never set"
    fn get(&self) -> Option<String> {
        self.load().unwrap_or_else(|e| {
            log::warn!("Failed to read language preference: {}", e);
            None
        })
    }

    /// Persist `code`; storage failures are logged only
    fn set(&self, code: &str) {
        if let Err(e) = self.save(code) {
            log::warn!("Failed to save language preference: {}", e);
        }
    }
}

/// In-process preference
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    value: RefCell<Option<String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(code: &str) -> Self {
        Self {
            value: RefCell::new(Some(code.to_string())),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.value.borrow().clone())
    }

    fn save(&self, code: &str) -> Result<()> {
        *self.value.borrow_mut() = Some(code.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FilePreferences;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::PreferenceStore;
    use crate::core::{Error, Result, APP_DIR};
    use serde::{Deserialize, Serialize};
    use std::fs;
    use std::path::PathBuf;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct StoredPreference {
        #[serde(default)]
        language: Option<String>,
    }

    /// Preference kept in `preferences.toml`
    #[derive(Debug, Clone)]
    pub struct FilePreferences {
        path: PathBuf,
    }

    impl FilePreferences {
        /// Store under the platform config directory
        pub fn new() -> Result<Self> {
            let config_dir = dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
            Ok(Self::at(config_dir.join(APP_DIR).join("preferences.toml")))
        }

        /// Store at an explicit path
        pub fn at(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }
    }

    impl PreferenceStore for FilePreferences {
        fn load(&self) -> Result<Option<String>> {
            if !self.path.exists() {
                return Ok(None);
            }
            let content = fs::read_to_string(&self.path)?;
            let stored: StoredPreference = toml::from_str(&content)
                .map_err(|e| Error::Storage(format!("Failed to parse preferences: {}", e)))?;
            Ok(stored.language)
        }

        fn save(&self, code: &str) -> Result<()> {
            if let Some(dir) = self.path.parent() {
                fs::create_dir_all(dir)?;
            }
            let stored = StoredPreference {
                language: Some(code.to_string()),
            };
            let content = toml::to_string_pretty(&stored)
                .map_err(|e| Error::Serialization(e.to_string()))?;
            fs::write(&self.path, content)?;
            Ok(())
        }
    }
}
