//! Command-line interface for pg-mock-mapping
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Joining the positional tokens into one query string
//! - The usage message printed when no query is given
//! - Configuration loading and overrides from flags

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::error::{PgMockError, Result};

/// Capture PostgreSQL query results as JSON mock mappings
#[derive(Parser, Debug)]
#[command(
    name = "pg-mock-mapping",
    version,
    about = "Run one SQL statement and print its rows as JSON",
    long_about = "Runs one SQL statement against the configured PostgreSQL database and prints
the result set to stdout as a pretty-printed JSON array, suitable for saving
as a mock mapping fixture:

    pg-mock-mapping 'SELECT * from load_interface_in()' > load_interface_in.json"
)]
pub struct CliArgs {
    /// SQL query; all tokens are joined with single spaces
    #[arg(
        value_name = "SQL-QUERY",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub query: Vec<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Server to connect to
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to connect to
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Database name to use
    #[arg(long, value_name = "NAME")]
    pub database: Option<String>,

    /// Username for authentication
    #[arg(short = 'u', long, value_name = "USERNAME")]
    pub user: Option<String>,

    /// Password for authentication
    #[arg(short = 'p', long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Version of the switch schema put on the search path
    #[arg(long, value_name = "VERSION")]
    pub schema_version: Option<u32>,

    /// Connection timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub connect_timeout: Option<u64>,

    /// Indentation width of the JSON output
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,

    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Write non-ASCII characters as UTF-8 instead of \uXXXX escapes
    #[arg(long)]
    pub unicode: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

impl CliArgs {
    /// The query text, or `None` when no query tokens were given
    pub fn query_text(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.join(" "))
        }
    }

    /// Whether the invocation should end with the usage message
    pub fn needs_usage(&self) -> bool {
        self.query.is_empty() && !self.print_config
    }
}

/// Name the program was invoked as
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// Usage message shown when no query is given
pub fn usage_message(program: &str) -> String {
    format!("usage:\n    {program} sql-query")
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a CLI interface from parsed arguments
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or configuration error
    pub fn new(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Validated configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        // Apply CLI arguments to override config values
        Self::apply_args_to_config(&mut config, args);

        config.validate()?;
        Ok(config)
    }

    /// Get the query text
    ///
    /// Tokens are joined with single spaces; runs of spaces inside a
    /// single token are kept.
    pub fn query(&self) -> Option<String> {
        self.args.query_text()
    }

    /// Get the configuration
    ///
    /// # Returns
    /// * `&Config` - Reference to configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    ///
    /// # Returns
    /// * `&CliArgs` - Reference to arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Effective configuration as TOML, with the password masked
    pub fn config_to_toml(&self) -> Result<String> {
        let mut config = self.config.clone();
        config.connection.password = "***".to_string();
        toml::to_string_pretty(&config).map_err(|e| PgMockError::Generic(e.to_string()))
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    ///
    /// # Arguments
    /// * `config` - Configuration to modify
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_connection_args(config, args);
        Self::apply_display_args(config, args);
        Self::apply_logging_args(config, args);
    }

    /// Apply connection-related CLI arguments to configuration
    fn apply_connection_args(config: &mut Config, args: &CliArgs) {
        let conn = &mut config.connection;

        if let Some(host) = &args.host {
            conn.host = host.clone();
        }
        if let Some(port) = args.port {
            conn.port = port;
        }
        if let Some(database) = &args.database {
            conn.database = database.clone();
        }
        if let Some(user) = &args.user {
            conn.user = user.clone();
        }
        if let Some(password) = &args.password {
            conn.password = password.clone();
        }
        if let Some(version) = args.schema_version {
            conn.schema_version = version;
        }
        if let Some(timeout) = args.connect_timeout {
            conn.connect_timeout = Some(timeout);
        }
    }

    /// Apply display-related CLI arguments to configuration
    fn apply_display_args(config: &mut Config, args: &CliArgs) {
        if let Some(indent) = args.indent {
            config.display.indent = indent;
        }

        if args.compact {
            config.display.pretty = false;
        }

        if args.unicode {
            config.display.ascii = false;
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }
}
