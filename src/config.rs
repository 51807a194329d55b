//! Configuration module for the OpenVPN status parser
//!
//! This module provides TOML-based configuration parsing and validation
//! for the library and the `ovpn-status` binary.

use crate::error::{Result, StatusError};
use crate::parser::headers::HeaderMatching;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Where the status file lives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path of the status file written by the daemon
    pub path: Option<PathBuf>,
}

/// Parser behaviour settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// How column header rows are recognized
    #[serde(default)]
    pub header_matching: HeaderMatching,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
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

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Status source configuration
    #[serde(default)]
    pub source: SourceConfig,
    /// Parser configuration
    #[serde(default)]
    pub parser: ParserConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| StatusError::Config(format!("Failed to read config file: {e}")))?;

        <Self as FromStr>::from_str(&contents)
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.source.path {
            if path.as_os_str().is_empty() {
                return Err(StatusError::Config(
                    "Status file path cannot be empty".to_string(),
                ));
            }
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(StatusError::Config(format!(
                "Unknown log level '{}', expected one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = StatusError;

    fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

// Default value functions for serde
fn default_log_level() -> String {
    "info".to_string()
}
