// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! heave: push oversized git repositories without tripping remote
//! transfer limits.

mod commands;
mod exit_error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_error::ExitError;

#[derive(Parser)]
#[command(
    name = "heave",
    version,
    about = "Measure, plan, and execute pushes of oversized git repositories"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Emit machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Measure repository and push characteristics
    Analyze {
        /// Repository path (defaults to the current directory)
        path: Option<PathBuf>,
    },
    /// Recommend a transfer strategy from the current state
    Plan {
        path: Option<PathBuf>,
    },
    /// Push unpushed commits in adaptively sized batches
    Push {
        path: Option<PathBuf>,
        /// Initial number of commits per batch
        #[arg(long)]
        batch_size: Option<usize>,
    },
}

fn repo_path(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Analyze { path } => commands::analyze(&repo_path(path), cli.json).await,
        Command::Plan { path } => commands::plan(&repo_path(path), cli.json).await,
        Command::Push { path, batch_size } => {
            commands::push(&repo_path(path), batch_size, cli.json).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(ExitError { code, message }) => {
            eprintln!("heave: error: {message}");
            ExitCode::from(code)
        }
    }
}

/// `HEAVE_LOG` (falling back to `RUST_LOG`) controls verbosity; silent by
/// default so command output stays clean.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = std::env::var("HEAVE_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "off".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}
