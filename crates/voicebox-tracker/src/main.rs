//! Voicebox Tracker: follow background voice tasks and record from local
//! input devices.

mod app;
mod cli;
mod config;
mod error;
mod logging;
mod meter;
mod progress_view;
mod task_view;
mod wav;

pub(crate) use {
    app::App,
    cli::{Cli, Command},
    error::{AppError, Result as AppResult},
};

use crate::config::Config;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

/// Application entry point.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Held until exit so buffered log lines reach the file.
    let _log_guard = logging::init(Config::log_dir().ok().as_deref());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    let mut config = Config::load_from(&config_path)?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    App::new(config, config_path).run(cli.command).await
}
