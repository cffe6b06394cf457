//! pg-mock-mapping - capture PostgreSQL query results as JSON
//!
//! # Usage
//!
//! ```bash
//! pg-mock-mapping 'SELECT * from load_interface_in()' > /etc/yeti/db_map/load_interface_in.json
//! ```

use std::io::Write;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use pg_mock_mapping::cli::{self, CliArgs, CliInterface};
use pg_mock_mapping::error::Result;
use pg_mock_mapping::executor::QueryExporter;

/// Application entry point
#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    if args.needs_usage() {
        println!("{}", cli::usage_message(&cli::program_name()));
        std::process::exit(1);
    }

    if let Err(e) = run(args).await {
        eprintln!("{}", e.diagnostic());
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Load configuration
/// 2. Initialize logging
/// 3. Execute the query and print the JSON document
async fn run(args: CliArgs) -> Result<()> {
    let cli = CliInterface::new(args)?;

    initialize_logging(&cli);

    if cli.args().print_config {
        write_stdout(&cli.config_to_toml()?)?;
        return Ok(());
    }

    let Some(query) = cli.query() else {
        return Ok(());
    };

    let exporter = QueryExporter::new(cli.config().clone());
    let output = exporter.export(&query).await?;
    write_stdout(&output)?;
    Ok(())
}

/// Write `text` and a newline to stdout in one go
fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")?;
    stdout.flush()?;
    Ok(())
}

/// Initialize logging system based on verbosity level
///
/// Logs go to stderr so stdout carries nothing but the JSON document.
/// `RUST_LOG` directives are honoured on top of the configured level.
///
/// # Arguments
/// * `cli` - CLI interface with verbosity settings
fn initialize_logging(cli: &CliInterface) {
    let level = cli.config().logging.level.to_tracing_level();
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // Configure timestamps
    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
