// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! stagehand: run the demo pipeline and control a running scheduler.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "stagehand", version, about = "Persistent cooperative job scheduler")]
struct Cli {
    /// Root directory for the scheduler's state files.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Schedule the demo pipeline and drive the loop until drain or stop.
    Run {
        /// Admission width per tick.
        #[arg(long, default_value_t = stagehand_engine::config::POOL_SIZE)]
        pool_size: usize,
        /// Quiescent sleep between ticks, in milliseconds.
        #[arg(long, default_value_t = 1000)]
        tick_ms: u64,
    },
    /// Ask a running scheduler to stop gracefully (flips the stop flag).
    Stop,
    /// Show done/queued/running counts from the state files.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run { pool_size, tick_ms } => commands::run(&cli.root, pool_size, tick_ms).await,
        Command::Stop => commands::stop(&cli.root),
        Command::Status => commands::status(&cli.root),
    }
}
