//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{Result, TrackerError};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_invites_config(&settings.invites)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(TrackerError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(TrackerError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(TrackerError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate invite policy
fn validate_invites_config(config: &super::InvitesConfig) -> Result<()> {
    if config.ttl_seconds == 0 {
        return Err(TrackerError::Config(
            "Invite TTL must be greater than 0".to_string(),
        ));
    }

    if config.join_code_attempts == 0 {
        return Err(TrackerError::Config(
            "Join code attempts must be greater than 0".to_string(),
        ));
    }

    match url::Url::parse(&config.base_url) {
        Ok(url) if url.cannot_be_a_base() => Err(TrackerError::Config(format!(
            "Invite base URL cannot carry a path: {}",
            config.base_url
        ))),
        Ok(_) => Ok(()),
        Err(e) => Err(TrackerError::Config(format!(
            "Invalid invite base URL {}: {}",
            config.base_url, e
        ))),
    }
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(TrackerError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(TrackerError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    if matches!(&config.file_path, Some(path) if path.trim().is_empty()) {
        return Err(TrackerError::Config(
            "Log file path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}
