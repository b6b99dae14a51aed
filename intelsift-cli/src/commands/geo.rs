//! Geo command - geolocation lookup for an IP or domain.

use anyhow::Result;
use clap::Args;
use intelsift_core::{IntelRecord, ResultSet, Subject};
use intelsift_fetch::LookupContext;
use intelsift_providers::EndpointRegistry;
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::info;

use crate::output::Reporter;
use crate::{sink, Cli};

/// Arguments for the geo command.
#[derive(Args)]
pub struct GeoArgs {
    /// IP address or domain to locate.
    #[arg(long, short)]
    pub target: String,

    /// Output CSV path (default derived from the target).
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl GeoArgs {
    /// Returns the output path, deriving one from the target if unset.
    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_output_name(&self.target)))
    }
}

/// Runs the geo command.
pub async fn run(args: &GeoArgs, cli: &Cli) -> Result<()> {
    let reporter = Reporter::new(!cli.no_color, cli.quiet);

    let subject = if args.target.parse::<IpAddr>().is_ok() {
        Subject::ip(&args.target)
    } else {
        Subject::domain(&args.target)
    };

    info!(subject = %subject, "Starting geolocation lookup");
    reporter.info(&format!("Locating {}...", args.target));

    let ctx = LookupContext::new()?;
    let chain = EndpointRegistry::geolocation_chain();
    let outcome = chain.execute(&ctx, &subject).await;

    let Some(records) = outcome.records() else {
        reporter.error(&format!(
            "All geolocation endpoints failed for {} ({} tried)",
            args.target,
            outcome.attempts_count()
        ));
        return Ok(());
    };

    let mut set = ResultSet::new();
    for record in records {
        if let IntelRecord::Canonical(canonical) = record {
            reporter.geo_details(canonical);
        }
        set.push(record.clone());
    }

    let output = args.output_path();
    sink::write_csv(&set, &output)?;
    reporter.success(&format!("Results saved to {}", output.display()));

    Ok(())
}

/// Derives the default output filename from the target.
///
/// Dots and colons become underscores so the target is filesystem-safe.
fn default_output_name(target: &str) -> String {
    let safe: String = target
        .chars()
        .map(|c| if c == '.' || c == ':' { '_' } else { c })
        .collect();
    format!("iplocation-results-{safe}.csv")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_name_for_ipv4() {
        assert_eq!(
            default_output_name("8.8.8.8"),
            "iplocation-results-8_8_8_8.csv"
        );
    }

    #[test]
    fn test_default_output_name_for_domain() {
        assert_eq!(
            default_output_name("example.com"),
            "iplocation-results-example_com.csv"
        );
    }

    #[test]
    fn test_default_output_name_for_ipv6() {
        assert_eq!(
            default_output_name("2001:4860::8888"),
            "iplocation-results-2001_4860__8888.csv"
        );
    }

    #[test]
    fn test_explicit_output_wins() {
        let args = GeoArgs {
            target: "8.8.8.8".to_string(),
            output: Some(PathBuf::from("custom.csv")),
        };
        assert_eq!(args.output_path(), PathBuf::from("custom.csv"));
    }
}
