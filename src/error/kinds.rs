use std::{fmt, io};

use crate::error::postgres::format_postgres_error;

/// Crate-wide `Result` type using [`PgMockError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, PgMockError>;

/// Top-level error type for pg-mock-mapping operations.
///
/// Every failure after the usage check ends up here and is reported
/// as a single "operation failed" line on stderr.
#[derive(Debug)]
pub enum PgMockError {
    /// Connection-related errors.
    Connection(ConnectionError),

    /// Statement execution and row decoding errors.
    Execution(ExecutionError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// PostgreSQL driver errors.
    Postgres(tokio_postgres::Error),

    /// JSON serialization errors.
    Serialization(serde_json::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// Failed to establish a connection.
    ConnectFailed(String),

    /// Connection timeout.
    Timeout,
}

/// Execution-specific errors.
#[derive(Debug)]
pub enum ExecutionError {
    /// The statement does not produce a result set.
    NoResults,

    /// A column value that could not be decoded.
    Decode { column: String, message: String },
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

impl PgMockError {
    /// Render the error as the single diagnostic line written to stderr.
    ///
    /// Server messages can span several lines (DETAIL, HINT); those are
    /// folded so the report stays on one line.
    pub fn diagnostic(&self) -> String {
        fold_lines(&self.to_string())
    }
}

/// Join the non-empty lines of `text` with `"; "`.
pub(crate) fn fold_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for PgMockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PgMockError::Connection(e) => write!(f, "Connection error: {e}"),
            PgMockError::Execution(e) => write!(f, "{e}"),
            PgMockError::Config(e) => write!(f, "Configuration error: {e}"),
            PgMockError::Io(e) => write!(f, "I/O error: {e}"),
            PgMockError::Postgres(e) => format_postgres_error(f, e),
            PgMockError::Serialization(e) => write!(f, "Serialization error: {e}"),
            PgMockError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ConnectFailed(msg) => write!(f, "Failed to connect: {msg}"),
            ConnectionError::Timeout => write!(f, "Connection timeout"),
        }
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::NoResults => write!(f, "no results to fetch"),
            ExecutionError::Decode { column, message } => {
                write!(f, "Failed to decode column '{column}': {message}")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for PgMockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PgMockError::Io(e) => Some(e),
            PgMockError::Postgres(e) => Some(e),
            PgMockError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for ConnectionError {}
impl std::error::Error for ExecutionError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to PgMockError ========================= */

impl From<io::Error> for PgMockError {
    fn from(err: io::Error) -> Self {
        PgMockError::Io(err)
    }
}

impl From<tokio_postgres::Error> for PgMockError {
    fn from(err: tokio_postgres::Error) -> Self {
        PgMockError::Postgres(err)
    }
}

impl From<serde_json::Error> for PgMockError {
    fn from(err: serde_json::Error) -> Self {
        PgMockError::Serialization(err)
    }
}

impl From<ConnectionError> for PgMockError {
    fn from(err: ConnectionError) -> Self {
        PgMockError::Connection(err)
    }
}

impl From<ExecutionError> for PgMockError {
    fn from(err: ExecutionError) -> Self {
        PgMockError::Execution(err)
    }
}

impl From<ConfigError> for PgMockError {
    fn from(err: ConfigError) -> Self {
        PgMockError::Config(err)
    }
}
