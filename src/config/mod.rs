//! Configuration management for pg-mock-mapping
//!
//! Connection parameters default to the fixed values of the yeti
//! development database. They may be overridden from:
//! - A configuration file (TOML format)
//! - Command-line arguments
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Schema version selecting the `switch<N>` search path.
pub const SCHEMA_VERSION: u32 = 21;

/// Largest accepted indent width for pretty output.
const MAX_INDENT: usize = 16;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Connection configuration
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_password")]
    pub password: String,

    /// Version number of the `switch` schema placed on the search path
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Connect timeout in seconds; unset means wait indefinitely
    #[serde(default)]
    pub connect_timeout: Option<u64>,

    /// Reported to the server as `application_name`
    #[serde(default = "default_application_name")]
    pub application_name: String,
}

/// Display and output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Indentation width used for pretty output
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Pretty-print (multi-line) instead of single-line JSON
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Escape non-ASCII characters as `\uXXXX`
    #[serde(default = "default_ascii")]
    pub ascii: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_database() -> String {
    "yeti".to_string()
}

fn default_user() -> String {
    "yeti".to_string()
}

fn default_password() -> String {
    "yeti".to_string()
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_application_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_indent() -> usize {
    4
}

fn default_pretty() -> bool {
    true
}

fn default_ascii() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    false
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: default_database(),
            user: default_user(),
            password: default_password(),
            schema_version: default_schema_version(),
            connect_timeout: None,
            application_name: default_application_name(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            pretty: default_pretty(),
            ascii: default_ascii(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// With an explicit path the file must exist. Without one, the default
    /// location is read when present and defaults are used otherwise.
    ///
    /// # Arguments
    /// * `path` - Optional path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.display().to_string()).into());
                }
                Self::from_file(path)
            }
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - `<config dir>/pg-mock-mapping/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(env!("CARGO_PKG_NAME"))
            .join("config.toml")
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        self.connection.validate()?;

        if self.display.indent > MAX_INDENT {
            return Err(invalid("display.indent", self.display.indent));
        }

        Ok(())
    }
}

impl ConnectionConfig {
    /// Server-side session options: puts the versioned `switch` schema on
    /// the search path after `public`.
    pub fn session_options(&self) -> String {
        format!("-c search_path=public,switch{}", self.schema_version)
    }

    /// Connect timeout as a Duration; `None` waits indefinitely
    pub fn timeout(&self) -> Option<Duration> {
        self.connect_timeout.map(Duration::from_secs)
    }

    /// Connection endpoint without the password, for logging
    pub fn sanitized_endpoint(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }

    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(invalid("connection.host", &self.host));
        }
        if self.port == 0 {
            return Err(invalid("connection.port", self.port));
        }
        if self.database.trim().is_empty() {
            return Err(invalid("connection.database", &self.database));
        }
        if self.user.trim().is_empty() {
            return Err(invalid("connection.user", &self.user));
        }
        if self.connect_timeout == Some(0) {
            return Err(invalid("connection.connect_timeout", 0));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: impl ToString) -> crate::error::PgMockError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
    .into()
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
