// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! intelsift CLI - multi-source breach and geolocation lookups.
//!
//! # Examples
//!
//! ```bash
//! # Phonebook search for a domain (two-phase submit/poll)
//! intelsift search --domain example.com --api-key $INTELX_API_KEY
//!
//! # Breach-credential lookups for a file of emails
//! intelsift breach --file emails.txt
//!
//! # Geolocation for an IP or domain
//! intelsift geo --target 8.8.8.8
//!
//! # Verbose logging
//! intelsift geo --target 8.8.8.8 --verbose
//! ```

mod commands;
mod output;
mod sink;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{breach, geo, search};

// ============================================================================
// CLI Definition
// ============================================================================

/// intelsift CLI - multi-source intelligence lookups.
#[derive(Parser)]
#[command(name = "intelsift")]
#[command(about = "Multi-source breach and geolocation intelligence lookups")]
#[command(long_about = r#"
intelsift queries several independent third-party services and reduces their
inconsistent responses into a uniform record set.

Commands:
  search   Phonebook search by email, domain, or link pattern (IntelX)
  breach   Breach-credential lookups for a file of emails (LeakCheck + COMB)
  geo      Geolocation lookup for an IP or domain (ip-api.com and fallbacks)

Examples:
  intelsift search -d example.com -k <api-key>
  intelsift breach -f emails.txt
  intelsift geo -t 8.8.8.8
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Phonebook search via the two-phase submit/poll protocol.
    #[command(visible_alias = "s")]
    Search(search::SearchArgs),

    /// Breach-credential lookups for a file of emails.
    #[command(visible_alias = "b")]
    Breach(breach::BreachArgs),

    /// Geolocation lookup for an IP or domain.
    #[command(visible_alias = "g")]
    Geo(geo::GeoArgs),
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success (including zero-result runs).
    Success = 0,
    /// General error (e.g. unreadable input file).
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("intelsift=debug,info")
    } else {
        EnvFilter::new("intelsift=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Search(args) => search::run(args, &cli).await,
        Commands::Breach(args) => breach::run(args, &cli).await,
        Commands::Geo(args) => geo::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
