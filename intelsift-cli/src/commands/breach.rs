//! Breach command - credential lookups for a file of email addresses.

use anyhow::{Context, Result};
use clap::Args;
use intelsift_core::{ResultSet, Subject};
use intelsift_fetch::LookupContext;
use intelsift_providers::EndpointRegistry;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::output::Reporter;
use crate::{sink, Cli};

/// Arguments for the breach command.
#[derive(Args)]
pub struct BreachArgs {
    /// Input file with one email address per line.
    #[arg(long, short)]
    pub file: PathBuf,

    /// Output CSV path.
    #[arg(long, short, default_value = "comb-results.csv")]
    pub output: PathBuf,
}

/// Runs the breach command.
///
/// An unreadable input file is the only fatal error; individual lookup
/// failures are reported per subject and the batch continues. A batch with
/// zero successful lookups ends normally.
pub async fn run(args: &BreachArgs, cli: &Cli) -> Result<()> {
    let reporter = Reporter::new(!cli.no_color, cli.quiet);

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let emails = valid_emails(&content);
    if emails.is_empty() {
        reporter.warn(&format!(
            "No valid email addresses found in {}",
            args.file.display()
        ));
        return Ok(());
    }

    info!(count = emails.len(), "Starting breach lookups");
    reporter.header(&format!("Checking {} email address(es)", emails.len()));

    let ctx = LookupContext::new()?;
    let chain = EndpointRegistry::breach_chain();
    let mut set = ResultSet::new();
    let mut hits = 0usize;

    for email in &emails {
        let subject = Subject::email(email);
        let outcome = chain.execute(&ctx, &subject).await;

        if let Some(records) = outcome.records() {
            hits += 1;
            reporter.success(&format!(
                "{email}: {} record(s) via {}",
                records.len(),
                outcome.successful_endpoint().unwrap_or("unknown")
            ));
            set.extend(records.iter().cloned());
        } else if outcome.is_exhausted() {
            reporter.warn(&format!("No results found in databases for {email}"));
        } else if let Err(e) = &outcome.result {
            // Chain-terminating failure for this subject only.
            warn!(email = %email, error = %e, "Lookup failed");
            reporter.error(&format!("{email}: {e}"));
        }
    }

    reporter.header(&format!(
        "Done: {hits}/{} address(es) with results, {} record(s) total",
        emails.len(),
        set.len()
    ));

    if set.is_empty() {
        reporter.info("No detailed credential data retrieved");
        return Ok(());
    }

    sink::write_csv(&set, &args.output)?;
    reporter.success(&format!("Results saved to {}", args.output.display()));

    Ok(())
}

/// Extracts the plausible email addresses from the input file.
///
/// Lines are trimmed; blank lines and lines without an `@` are dropped.
fn valid_emails(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.contains('@'))
        .map(ToString::to_string)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
