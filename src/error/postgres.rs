use std::fmt;

use tokio_postgres::error::{DbError, ErrorPosition};

/// Structured error information extracted from a server-side PostgreSQL error.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub(crate) severity: String,
    pub(crate) code: String,
    pub(crate) message: String,
    pub(crate) detail: Option<String>,
    pub(crate) hint: Option<String>,
    pub(crate) position: Option<u32>,
}

impl ErrorInfo {
    /// Extract the reportable fields of a server error.
    pub fn from_db_error(error: &DbError) -> Self {
        let position = match error.position() {
            Some(ErrorPosition::Original(pos)) => Some(*pos),
            Some(ErrorPosition::Internal { position, .. }) => Some(*position),
            None => None,
        };

        Self {
            severity: error.severity().to_string(),
            code: error.code().code().to_string(),
            message: error.message().to_string(),
            detail: error.detail().map(str::to_string),
            hint: error.hint().map(str::to_string),
            position,
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (SQLSTATE {})", self.severity, self.message, self.code)?;
        if let Some(position) = self.position {
            write!(f, " at character {position}")?;
        }
        if let Some(detail) = &self.detail {
            write!(f, "\nDETAIL: {detail}")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "\nHINT: {hint}")?;
        }
        Ok(())
    }
}

/// Format a driver error for the parent module's `Display` implementation.
///
/// Server errors are rendered from their fields; client-side failures
/// (I/O, authentication, protocol) fall back to the driver's own message.
pub fn format_postgres_error(f: &mut fmt::Formatter<'_>, error: &tokio_postgres::Error) -> fmt::Result {
    match error.as_db_error() {
        Some(db_error) => write!(f, "{}", ErrorInfo::from_db_error(db_error)),
        None => write!(f, "{error}"),
    }
}
