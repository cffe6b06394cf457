//! pg-mock-mapping library
//!
//! Runs a single SQL statement against PostgreSQL and renders the result set
//! as a JSON array of row objects. The output is used as a "mock mapping"
//! fixture standing in for a live database call.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `connection`: PostgreSQL session management
//! - `error`: Error types and handling
//! - `executor`: Statement execution and row decoding
//! - `formatter`: Value conversion and JSON output
//!
//! # Example
//!
//! ```no_run
//! use pg_mock_mapping::{Config, QueryExporter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let exporter = QueryExporter::new(Config::default());
//!     let json = exporter.export("SELECT * from load_interface_in()").await?;
//!     println!("{json}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod formatter;

// Re-export commonly used types
pub use config::Config;
pub use error::{PgMockError, Result};
pub use executor::{QueryExporter, ResultSet};
pub use formatter::{Formatter, PgValue};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}
