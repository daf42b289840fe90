use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mograph_worker::cli::Cli;
use mograph_worker::commands;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mograph_worker=info,mograph_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match commands::run(cli).await {
        Ok(report) => {
            match serde_json::to_string_pretty(&report.body) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialise report");
                    return ExitCode::FAILURE;
                }
            }
            if report.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
