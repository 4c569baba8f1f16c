//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `MEEPLELOG__INVITES__TTL_SECONDS`
pub const ENV_PREFIX: &str = "MEEPLELOG";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub invites: InvitesConfig,
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Invite issuance and join policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InvitesConfig {
    /// Lifetime of a freshly issued invite token
    pub ttl_seconds: u64,
    /// Join codes drawn before giving up on a collision streak
    pub join_code_attempts: u32,
    /// Legacy join path that trusts the join code alone
    pub allow_code_only_join: bool,
    pub regenerate_requires_admin: bool,
    /// Origin used when building shareable invite links
    pub base_url: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when unset
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from `config.toml` (optional) and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::builder(config::File::with_name("config").required(false))?
            .build()?
            .try_deserialize()
    }

    /// Load settings from an explicit file, still honouring environment overrides
    pub fn from_file(path: &Path) -> Result<Self, config::ConfigError> {
        Self::builder(config::File::from(path).required(true))?
            .build()?
            .try_deserialize()
    }

    fn builder(
        file: config::File<config::FileSourceFile, config::FileFormat>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        Ok(config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            ))
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::TrackerError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/meeplelog".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            invites: InvitesConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}

impl Default for InvitesConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 3600,
            join_code_attempts: 5,
            allow_code_only_join: false,
            regenerate_requires_admin: false,
            base_url: "http://localhost:3000".to_string(),
        }
    }
}
