//! cynotify - CI test-run Slack notifier
//!
//! Parses the captured stdout of a test run, builds a summary message,
//! and posts it to Slack. Meant to run as the last step of a CI workflow:
//!
//! ```text
//! NO_COLOR=1 npx cypress run | tee run-output.txt
//! cynotify run-output.txt
//! ```
//!
//! Configuration comes from the CI environment: `GITHUB_RUN_ID`,
//! `GITHUB_RUN_URL_BASE`, `SLACK_QA_GROUP_ID`, `SLACK_BOT_TOKEN`,
//! `SLACK_CHANNEL_NAME_ALL` and `SLACK_CHANNEL_NAME_FAILS`.

use anyhow::{Context, Result};
use clap::Parser;
use cynotify_core::{deliver, parse_run_file, render, Config, SlackClient};
use std::path::PathBuf;
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "cynotify")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Post a test-run summary to Slack", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,

    /// Parse and print the message without delivering it
    #[arg(long)]
    dry_run: bool,

    /// Captured test-runner output file
    output_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    cynotify_core::init_tracing(cli.json, level);

    let config = Config::from_env();

    let summary = parse_run_file(&cli.output_file).with_context(|| {
        format!(
            "Failed to parse run output {}",
            cli.output_file.display()
        )
    })?;
    let notification = render(&summary, &config);

    if cli.dry_run {
        println!("{}", notification.text);
        return Ok(());
    }

    let token = config
        .bot_token
        .as_deref()
        .context("SLACK_BOT_TOKEN is not set")?;
    let client = SlackClient::new(token);

    let report = deliver(&client, &notification, &config).await;
    if report.failed > 0 {
        warn!(
            "{} of {} deliveries failed",
            report.failed,
            report.delivered + report.failed
        );
    } else {
        info!("Delivered to {} channel(s)", report.delivered);
    }

    Ok(())
}
