use crate::config::Config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Follow voicebox background tasks and record from local input devices.
#[derive(Debug, Parser)]
#[command(name = "voicebox-tracker")]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding `server.base_url`.
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Apply global flags on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(base_url) = &self.server {
            config.server.base_url = base_url.clone();
        }
    }
}

/// Subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Follow the unified active-task list until Ctrl-C.
    Tasks {
        /// Poll interval in milliseconds.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval_ms: Option<u64>,
    },

    /// Follow one recording-processing task until it finishes.
    Progress {
        /// Id of the recording-processing task.
        task_id: String,

        /// Poll interval in milliseconds.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval_ms: Option<u64>,
    },

    /// List input devices and which one would be selected.
    Devices {
        /// Device id to resolve against the listing (defaults to the configured one).
        #[arg(long)]
        current: Option<String>,

        /// Store the resolved device in the config file.
        #[arg(long)]
        save: bool,
    },

    /// Capture briefly and report whether the device hears anything.
    Probe {
        /// Input device id as shown by `devices` (defaults to the configured one).
        #[arg(long)]
        device: Option<String>,

        /// Probe window in milliseconds.
        #[arg(long, default_value_t = 1500, value_parser = clap::value_parser!(u64).range(1..))]
        duration_ms: u64,
    },

    /// Record to a WAV file until Ctrl-C or the duration limit.
    Record {
        /// Input device id as shown by `devices` (defaults to the configured one).
        #[arg(long)]
        device: Option<String>,

        /// Maximum recording length in seconds.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_seconds: Option<u64>,

        /// Output WAV path.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
