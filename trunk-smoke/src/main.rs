// ABOUTME: Smoke test for the Trunk merge queue tools.
// ABOUTME: Checks registration, runs a few live calls, exits non-zero only on missing handlers.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ide_tools::prelude::*;
use ide_tools::smoke::render;

#[derive(Parser)]
#[command(name = "trunk-smoke", about = "Smoke test the Trunk merge queue tool handlers")]
struct Cli {
    /// Only check that every handler is registered.
    #[arg(long)]
    skip_calls: bool,

    /// Print the tool definitions as JSON and exit.
    #[arg(long)]
    list_tools: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_queue() -> Arc<dyn MergeQueue> {
    match TrunkClient::from_env() {
        Ok(client) => {
            let config = client.config();
            info!(
                repo = %format!("{}/{}", config.owner, config.name),
                branch = %config.target_branch,
                "using Trunk merge queue"
            );
            Arc::new(client)
        }
        Err(e) => {
            warn!(error = %e, "merge queue not configured, calls will report not_configured");
            let reason = match e {
                MergeQueueError::NotConfigured(reason) => reason,
                other => other.to_string(),
            };
            Arc::new(UnconfiguredQueue::new(reason))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Load .env file if present
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing();

    let registry = Registry::with_merge_queue(build_queue());

    if cli.list_tools {
        println!(
            "{}",
            serde_json::to_string_pretty(&registry.to_definitions())?
        );
        return Ok(ExitCode::SUCCESS);
    }

    let mut harness = Harness::new(&registry);
    if cli.skip_calls {
        harness = harness.cases(Vec::new());
    }
    let report = harness.run().await;

    // A closed stdout must not turn a passing run into a failure.
    if let Err(e) = render(&report, &mut std::io::stdout().lock()) {
        warn!(error = %e, "failed to write report");
    }
    if let Err(e) = report.registration.clone().into_result() {
        error!(error = %e, "registration check failed");
    }

    Ok(ExitCode::from(report.exit_code()))
}
