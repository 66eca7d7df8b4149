//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
    pub query: QueryConfig,
}

/// REST backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub default_language: String,
    pub supported_languages: Vec<String>,
    /// Directory holding `translations_<lang>.json` override files
    pub overrides_dir: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily-rolling log files; stderr only when unset
    pub file_path: Option<String>,
}

/// Event list display and ordering defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    /// strftime pattern used to render dates for display and text search
    pub date_display_format: String,
    pub default_sort_key: Option<String>,
    pub default_sort_direction: Option<String>,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("config")
    }

    /// Load settings from the named file (extension optional) layered under
    /// `PARTYBOARD__SECTION__KEY` environment variables
    pub fn from_file(name: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name(name).required(false))
            .add_source(
                config::Environment::with_prefix("PARTYBOARD")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::PartyBoardError> {
        super::validation::validate_settings(self)
    }

    /// Render the settings as a TOML document
    pub fn to_toml(&self) -> Result<String, crate::utils::errors::PartyBoardError> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::utils::errors::PartyBoardError::Config(e.to_string()))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            i18n: I18nConfig::default(),
            logging: LoggingConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            token: None,
            timeout_seconds: 10,
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            supported_languages: vec!["en".to_string(), "ar".to_string()],
            overrides_dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            date_display_format: crate::utils::helpers::DateFormatter::DEFAULT_FORMAT.to_string(),
            default_sort_key: None,
            default_sort_direction: None,
        }
    }
}
