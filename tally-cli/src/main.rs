//! # Tally CLI Entry Point
//!
//! The main entry point for the tally command-line tool, which totals Jira
//! story points per user for a Program Increment.

use clap::Parser;
use tally_cli::cli::{self, handle_cli};
use tally_core::config::load_dotenv;
use tally_core::print_error;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
  // Parse CLI arguments using the derive-based implementation
  let cmd = cli::Cli::parse();

  let level = match cmd.verbose {
    0 => tracing::Level::WARN,  // Default: warnings and errors
    1 => tracing::Level::INFO,  // -v: info, warnings, and errors
    2 => tracing::Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => tracing::Level::TRACE, // -vvv or more: trace and everything else
  };

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  load_dotenv();

  if let Err(err) = handle_cli(cmd) {
    print_error(&format!("{err:#}"));
    std::process::exit(1);
  }
}
