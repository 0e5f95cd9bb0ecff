// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookout - watches the inquiry collection and replays offline writes.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;
mod runtime;
mod serve;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lookout_config::LookoutConfig;

/// Lookout - watches the inquiry collection and replays offline writes.
#[derive(Parser, Debug)]
#[command(name = "lookout", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the daemon: timed polls, write replay, and the gateway.
    Serve,
    /// Run one poll cycle and exit.
    Poll,
    /// Replay the write queue once and exit.
    Sync,
    /// Store the remote connection details.
    Configure {
        #[arg(long)]
        base_url: String,
        #[arg(long)]
        auth_token: Option<String>,
    },
    /// Show stored state: remote, last check, seen and queued counts.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => lookout_config::load_and_validate_path(path),
        None => lookout_config::load_and_validate(),
    };
    let config: LookoutConfig = match loaded {
        Ok(config) => config,
        Err(errors) => {
            lookout_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.daemon.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Poll) => commands::run_poll(&config).await,
        Some(Commands::Sync) => commands::run_sync(&config).await,
        Some(Commands::Configure {
            base_url,
            auth_token,
        }) => commands::run_configure(&config, base_url, auth_token).await,
        Some(Commands::Status { json, plain }) => status::run_status(&config, json, plain).await,
        None => {
            println!("lookout: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lookout={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
