//! MinuteSync - meeting notes to calendar bookings
//!
//! Main entry point for the `minutesync` binary.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use minutesync_app::commands::{analyze_file, check, render_outcome, run_once, watch};
use minutesync_app::server::serve;
use minutesync_app::utils::logging::init_tracing;
use minutesync_app::{AppContext, Cli, Command};
use minutesync_infra::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load .env before anything reads the environment
    let dotenv = dotenvy::dotenv();
    init_tracing(cli.log_json);
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }

    let config = config::load(cli.config.clone()).context("failed to load configuration")?;
    let ctx = Arc::new(AppContext::new(config).context("failed to initialize application")?);

    match cli.command {
        Command::Analyze { file, no_sync } => {
            let outcome = analyze_file(&ctx, &file, !no_sync).await?;
            println!("{}", render_outcome(&outcome));
        }
        Command::Run { watch: true, no_sync, interval_secs } => {
            watch(&ctx, !no_sync, Duration::from_secs(interval_secs.max(1))).await?;
        }
        Command::Run { watch: false, no_sync, .. } => {
            run_once(&ctx, !no_sync).await?;
        }
        Command::Check => {
            let report = check(&ctx).await;
            println!("{}", report.render());
            if !report.passed() {
                anyhow::bail!("service check failed");
            }
        }
        Command::Serve => serve(ctx).await?,
    }

    Ok(())
}
