//! Search command - phonebook lookup via the two-phase submit/poll protocol.

use anyhow::{bail, Result};
use clap::Args;
use intelsift_core::{ResultSet, Subject};
use intelsift_fetch::LookupContext;
use intelsift_providers::intelx::HttpSearchTransport;
use intelsift_providers::{PhonebookSearch, SearchState};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::output::Reporter;
use crate::{sink, Cli};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Email address to search for.
    #[arg(long, short, group = "term")]
    pub email: Option<String>,

    /// Domain to search for.
    #[arg(long, short, group = "term")]
    pub domain: Option<String>,

    /// Link pattern to search for.
    #[arg(long, short, group = "term")]
    pub links: Option<String>,

    /// API key for the phonebook service.
    #[arg(long, short = 'k', env = "INTELX_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Output CSV path.
    #[arg(long, short, default_value = "intelx-results.csv")]
    pub output: PathBuf,
}

impl SearchArgs {
    /// Returns the search subject, preferring email over domain over links.
    fn subject(&self) -> Option<Subject> {
        if let Some(email) = &self.email {
            return Some(Subject::email(email));
        }
        if let Some(domain) = &self.domain {
            return Some(Subject::domain(domain));
        }
        self.links.as_deref().map(Subject::link_pattern)
    }
}

/// Runs the search command.
pub async fn run(args: &SearchArgs, cli: &Cli) -> Result<()> {
    let reporter = Reporter::new(!cli.no_color, cli.quiet);

    let Some(subject) = args.subject() else {
        bail!("No search term given (use --email, --domain, or --links)");
    };

    info!(subject = %subject, "Starting phonebook search");

    let ctx = LookupContext::new()?;
    let transport = HttpSearchTransport::new(ctx.http.clone());
    let search = PhonebookSearch::new(transport, ctx.settings.settle_delay);

    reporter.info(&format!("Searching phonebook for {subject}..."));

    let state = search.run(subject.as_str(), &args.api_key).await;
    debug!(state = state.label(), "Search finished");

    match state {
        SearchState::Ready(records) => {
            if records.is_empty() {
                reporter.warn(&format!("No results found for {subject}"));
                return Ok(());
            }

            reporter.success(&format!("Found {} result(s) for {subject}", records.len()));
            for record in &records {
                if let Some(value) = &record.resolved_query {
                    reporter.info(&format!("  {value}"));
                }
            }

            let mut set = ResultSet::new();
            set.extend(records);
            sink::write_csv(&set, &args.output)?;
            reporter.success(&format!("Results saved to {}", args.output.display()));
        }
        SearchState::AuthFailed => {
            reporter.error("The service rejected the API key");
        }
        SearchState::SubmitFailed(reason) => {
            reporter.error(&format!("Search submission failed: {reason}"));
        }
        SearchState::PollFailed(reason) => {
            reporter.error(&format!("Fetching search results failed: {reason}"));
        }
    }

    Ok(())
}
