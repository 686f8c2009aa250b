// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, upload limits, training defaults, and gateway trust from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use crate::constants::{ingestion, ports, training_load};
use anyhow::{Context, Result};
use ringside_intelligence::ColumnMapping;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational output
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        };
        f.write_str(name)
    }
}

/// CSV upload limits and column mapping source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Maximum request body size in bytes
    pub max_file_size_bytes: usize,
    /// Maximum number of events accepted from one upload
    pub max_row_count: usize,
    /// Number of events returned by a preview
    pub preview_rows: usize,
    /// JSON file overriding the default column mapping
    pub column_mapping_path: Option<PathBuf>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: ingestion::DEFAULT_MAX_FILE_SIZE_BYTES,
            max_row_count: ingestion::DEFAULT_MAX_ROW_COUNT,
            preview_rows: ingestion::DEFAULT_PREVIEW_ROWS,
            column_mapping_path: None,
        }
    }
}

impl UploadConfig {
    /// Column mapping from `column_mapping_path`, or the built-in default
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping file cannot be read or is not valid JSON
    pub fn column_mapping(&self) -> Result<ColumnMapping> {
        self.column_mapping_path
            .as_deref()
            .map_or_else(|| Ok(ColumnMapping::default()), load_column_mapping)
    }
}

/// Load a column mapping from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn load_column_mapping(path: &Path) -> Result<ColumnMapping> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read column mapping {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid column mapping JSON in {}", path.display()))
}

/// Training load defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Analysis window used when the request does not name one
    pub default_days: u32,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            default_days: training_load::DEFAULT_ANALYSIS_DAYS,
        }
    }
}

/// Identity handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthConfig {
    /// Accept identity from upstream gateway headers
    pub trust_gateway_headers: bool,
}

/// Server configuration loaded once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// HTTP listen address
    pub host: String,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Upload limits
    pub uploads: UploadConfig,
    /// Training load defaults
    pub training: TrainingConfig,
    /// Identity handling
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: ports::DEFAULT_HTTP_PORT,
            host: "127.0.0.1".to_owned(),
            log_level: LogLevel::default(),
            environment: Environment::default(),
            uploads: UploadConfig::default(),
            training: TrainingConfig::default(),
            auth: AuthConfig {
                trust_gateway_headers: true,
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed, or validation fails
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment =
            Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let config = Self {
            http_port: env_parse("HTTP_PORT", ports::DEFAULT_HTTP_PORT)?,
            host: env_var_or("HOST", "127.0.0.1"),
            log_level: LogLevel::from_str_or_default(&env_var_or("RUST_LOG", "info")),
            environment,
            uploads: UploadConfig {
                max_file_size_bytes: env_parse(
                    "UPLOAD_MAX_FILE_BYTES",
                    ingestion::DEFAULT_MAX_FILE_SIZE_BYTES,
                )?,
                max_row_count: env_parse("UPLOAD_MAX_ROWS", ingestion::DEFAULT_MAX_ROW_COUNT)?,
                preview_rows: env_parse("UPLOAD_PREVIEW_ROWS", ingestion::DEFAULT_PREVIEW_ROWS)?,
                column_mapping_path: env::var("CSV_COLUMN_MAPPING_PATH")
                    .ok()
                    .filter(|path| !path.trim().is_empty())
                    .map(PathBuf::from),
            },
            training: TrainingConfig {
                default_days: env_parse(
                    "TRAINING_LOAD_DEFAULT_DAYS",
                    training_load::DEFAULT_ANALYSIS_DAYS,
                )?,
            },
            auth: AuthConfig {
                trust_gateway_headers: env_parse(
                    "TRUST_GATEWAY_HEADERS",
                    !environment.is_production(),
                )?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow::anyhow!("HTTP_PORT must be greater than 0"));
        }
        if self.uploads.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("UPLOAD_MAX_FILE_BYTES must be greater than 0"));
        }
        if self.uploads.max_row_count == 0 {
            return Err(anyhow::anyhow!("UPLOAD_MAX_ROWS must be greater than 0"));
        }
        if self.uploads.preview_rows == 0 {
            return Err(anyhow::anyhow!("UPLOAD_PREVIEW_ROWS must be greater than 0"));
        }
        let allowed = training_load::MIN_ANALYSIS_DAYS..=training_load::MAX_ANALYSIS_DAYS;
        if !allowed.contains(&self.training.default_days) {
            return Err(anyhow::anyhow!(
                "TRAINING_LOAD_DEFAULT_DAYS must be between {} and {}",
                allowed.start(),
                allowed.end()
            ));
        }
        for warning in self.warnings() {
            warn!("{warning}");
        }
        Ok(())
    }

    /// Settings that are valid but leave part of the server unusable
    #[must_use]
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if !self.auth.trust_gateway_headers {
            warnings.push(
                "Gateway identity headers are not trusted and no other identity source is \
                 configured: every /api/v1 request will be rejected with 401",
            );
        }
        warnings
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Ringside Server Configuration:\n\
             - Listen: {}:{}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Upload Limit: {} bytes / {} rows\n\
             - Column Mapping: {}\n\
             - Training Window: {} days\n\
             - Gateway Headers: {}",
            self.host,
            self.http_port,
            self.environment,
            self.log_level,
            self.uploads.max_file_size_bytes,
            self.uploads.max_row_count,
            self.uploads
                .column_mapping_path
                .as_ref()
                .map_or_else(|| "built-in".to_owned(), |path| path.display().to_string()),
            self.training.default_days,
            if self.auth.trust_gateway_headers {
                "Trusted"
            } else {
                "Ignored"
            },
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("nonsense"), LogLevel::Info);
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(
            Environment::from_str_or_default("staging"),
            Environment::Development
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = ServerConfig::default();
        assert!(config.validate().is_ok());

        config.training.default_days = 120;
        assert!(config.validate().is_err());

        config.training.default_days = 28;
        config.uploads.max_row_count = 0;
        assert!(config.validate().is_err());
    }
}
