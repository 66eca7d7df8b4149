//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::query::{SortDirection, SortKey};
use crate::utils::errors::{PartyBoardError, Result};
use crate::utils::helpers::is_valid_date_format;
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;
    validate_query_config(&settings.query)?;

    Ok(())
}

/// Validate REST backend configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(PartyBoardError::Config(
            "API base URL is required".to_string()
        ));
    }

    url::Url::parse(&config.base_url)
        .map_err(|e| PartyBoardError::Config(format!("Invalid API base URL: {}", e)))?;

    if config.timeout_seconds == 0 {
        return Err(PartyBoardError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(PartyBoardError::Config(
            "Default language is required".to_string()
        ));
    }

    if config.supported_languages.is_empty() {
        return Err(PartyBoardError::Config(
            "At least one supported language is required".to_string()
        ));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(PartyBoardError::Config(
            "Default language must be in supported languages list".to_string()
        ));
    }

    if let Some(unknown) = config
        .supported_languages
        .iter()
        .find(|code| code.parse::<crate::i18n::Language>().is_err())
    {
        return Err(PartyBoardError::Config(
            format!("Unsupported language code: {}", unknown)
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(PartyBoardError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(PartyBoardError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

/// Validate event list defaults
fn validate_query_config(config: &super::QueryConfig) -> Result<()> {
    if !is_valid_date_format(&config.date_display_format) {
        return Err(PartyBoardError::Config(
            format!("Invalid date display format: {}", config.date_display_format)
        ));
    }

    if let Some(key) = &config.default_sort_key {
        if !SortKey::from_name(key).is_known() {
            return Err(PartyBoardError::Config(
                format!("Unknown default sort key: {}", key)
            ));
        }
    }

    if let Some(direction) = &config.default_sort_direction {
        direction.parse::<SortDirection>()
            .map_err(|_| PartyBoardError::Config(
                format!("Invalid default sort direction: {}", direction)
            ))?;
    }

    Ok(())
}
