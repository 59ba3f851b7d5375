//! Configuration management

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Directory name used under the platform config dir
pub(crate) const APP_DIR: &str = "site-lang-switcher";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub translations: TranslationsConfig,
    #[serde(default)]
    pub page: PageConfig,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        let app_config_dir = config_dir.join(APP_DIR);

        if !app_config_dir.exists() {
            fs::create_dir_all(&app_config_dir)?;
        }

        Ok(app_config_dir.join("config.toml"))
    }

    /// Load configuration from disk, writing defaults on first run
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// General switcher settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Language used when no preference is saved: a registry code or "auto"
    #[serde(default = "default_language")]
    pub language: String,
    /// Key of the persisted preference in browser storage
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_language() -> String { "en".to_string() }
fn default_storage_key() -> String { "language".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            storage_key: default_storage_key(),
        }
    }
}

/// Where translation bundles are fetched from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationsConfig {
    /// Origin prepended to the path pattern (empty = page origin in the browser)
    #[serde(default)]
    pub base_url: String,
    /// Resource path, `{lang}` is replaced by the language code
    #[serde(default = "default_path_pattern")]
    pub path_pattern: String,
    /// Local directory holding `<code>.json` bundles (native only)
    #[serde(default)]
    pub local_dir: Option<PathBuf>,
}

fn default_path_pattern() -> String { "/translations/{lang}.json".to_string() }

impl Default for TranslationsConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            path_pattern: default_path_pattern(),
            local_dir: None,
        }
    }
}

impl TranslationsConfig {
    /// Full URL of the bundle for `code`
    pub fn url_for(&self, code: &str) -> String {
        let path = self.path_pattern.replace("{lang}", code);
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Page markup the switcher binds to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Selector of the navigation container receiving the widget
    #[serde(default = "default_nav_selector")]
    pub nav_selector: String,
    /// `name` attribute of the contact form subject `<select>`
    #[serde(default = "default_subject_select")]
    pub subject_select: String,
    /// Attribute carrying the bundle key path of an element
    #[serde(default = "default_translate_attribute")]
    pub translate_attribute: String,
}

fn default_nav_selector() -> String { ".navbar .nav-container".to_string() }
fn default_subject_select() -> String { "subject".to_string() }
fn default_translate_attribute() -> String { "data-translate".to_string() }

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            nav_selector: default_nav_selector(),
            subject_select: default_subject_select(),
            translate_attribute: default_translate_attribute(),
        }
    }
}

impl PageConfig {
    /// Selector addressing the element bound to `path`
    pub fn marker_selector(&self, path: &str) -> String {
        format!("[{}=\"{}\"]", self.translate_attribute, path)
    }

    /// Selector addressing the subject `<select>`
    pub fn subject_selector(&self) -> String {
        format!("select[name=\"{}\"]", self.subject_select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.general.language, "en");
        assert_eq!(config.general.storage_key, "language");
        assert_eq!(config.translations.path_pattern, "/translations/{lang}.json");
        assert_eq!(config.page.nav_selector, ".navbar .nav-container");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
            [translations]
            base_url = "https://example.org/"
            "#,
        )
        .unwrap();
        assert_eq!(config.translations.url_for("ar"), "https://example.org/translations/ar.json");
        assert_eq!(config.general.language, "en");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("general = 3").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_selectors() {
        let page = PageConfig::default();
        assert_eq!(page.marker_selector("hero.title"), r#"[data-translate="hero.title"]"#);
        assert_eq!(page.subject_selector(), r#"select[name="subject"]"#);
    }
}
