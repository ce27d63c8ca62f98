use std::process::ExitCode;

use chainfolio_core::{config::Config, telemetry};
use clap::Parser as _;
use cli::Cli;
use tokio::{
    select,
    signal::unix::{SignalKind, signal},
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod chart;
mod cli;
mod portfolio;
mod render;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = color_eyre::install() {
        eprintln!("failed to install error report handler: {err}");
        return ExitCode::FAILURE;
    }

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err:?}");
            return ExitCode::FAILURE;
        }
    };

    let logging = telemetry::env_filter(&config.log_level)
        .and_then(|filter| telemetry::init_subscriber(telemetry::get_subscriber(filter)));
    if let Err(err) = logging {
        eprintln!("Failed to set up logging: {err:?}");
        return ExitCode::FAILURE;
    }

    let shutdown_token = CancellationToken::new();
    let command_jh = tokio::spawn(cli.run(config, shutdown_token.clone()));

    // Set up signal handlers for graceful shutdown
    let mut sigterm = signal(SignalKind::terminate())
        .expect("setting sigterm listener on unix should always work");
    let mut sigint = signal(SignalKind::interrupt())
        .expect("setting sigint listener on unix should always work");

    // Wait for either command completion or interrupt signal
    let result = select! {
        res = command_jh => res,
        _ = sigterm.recv() => {
            info!("received SIGTERM signal");
            shutdown_token.cancel();
            return ExitCode::FAILURE;
        }
        _ = sigint.recv() => {
            info!("received SIGINT signal");
            shutdown_token.cancel();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(%e, "command exited unexpectedly");
            ExitCode::FAILURE
        }
    }
}
