#![deny(unsafe_code)]

//! Configuration loading and validation for the phonebook directory.
//!
//! Loads TOML configuration files and validates them against expected values.
//! Provides the [`AppConfig`] type as the central configuration structure.
//! Every section and every field is optional; an empty file yields
//! [`AppConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Accepted values for `directory.name_policy`.
pub const NAME_POLICIES: [&str; 2] = ["reject", "strip"];

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Contact directory behaviour.
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Image viewer invocation.
    #[serde(default)]
    pub viewer: ViewerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Contact directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// File offered by the save action when the user enters no name.
    #[serde(default = "default_save_file")]
    pub save_file: String,

    /// How names containing characters other than letters and spaces are
    /// handled: "reject" or "strip".
    #[serde(default = "default_name_policy")]
    pub name_policy: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            save_file: default_save_file(),
            name_policy: default_name_policy(),
        }
    }
}

fn default_save_file() -> String {
    "contacts.txt".to_string()
}

fn default_name_policy() -> String {
    "reject".to_string()
}

/// Image viewer configuration.
///
/// ## TOML Example
///
/// ```toml
/// [viewer]
/// command = "feh"
/// args = ["--scale-down"]
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Program used to open images. When absent the platform default
    /// (`xdg-open`, `open`, or `cmd /C start`) is used.
    #[serde(default)]
    pub command: Option<String>,

    /// Extra arguments placed before the image path.
    #[serde(default)]
    pub args: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "warn", "info", "debug").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Menu output shares the terminal with logs, so keep them quiet by default.
fn default_log_level() -> String {
    "warn".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.directory.save_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "directory.save_file must not be empty".to_string(),
            ));
        }
        if !NAME_POLICIES.contains(&self.directory.name_policy.as_str()) {
            return Err(ConfigError::Validation(format!(
                "directory.name_policy must be one of {:?}, got {:?}",
                NAME_POLICIES, self.directory.name_policy
            )));
        }
        if let Some(command) = &self.viewer.command {
            if command.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "viewer.command must not be empty when set".to_string(),
                ));
            }
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
