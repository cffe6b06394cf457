//! Error handling for pg-mock-mapping.
//!
//! All failures after argument parsing collapse into [`PgMockError`], which
//! the binary reports as a single line on stderr before exiting with status 1.
//! Server-side PostgreSQL errors are rendered from their structured fields
//! (severity, SQLSTATE, message, detail, hint) rather than the driver's
//! generic text.

pub mod kinds;
pub mod postgres;

// Re-export commonly used types
pub use kinds::{ConfigError, ConnectionError, ExecutionError, PgMockError, Result};
pub use postgres::ErrorInfo;
