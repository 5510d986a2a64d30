// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! flowpipe - Pipeline Script Classifier & Stage-Graph Sequencer
//!
//! Classify CI workflow and shell scripts into typed, sequenced stage graphs.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flowpipe::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flowpipe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Parse {
            files,
            dialect,
            format,
        } => flowpipe::cli::parse::run(files, dialect, format, cli.verbose).await,
        Commands::Graph {
            file,
            dialect,
            format,
        } => flowpipe::cli::graph::run(file, dialect, format, cli.verbose).await,
        Commands::Stages { format } => flowpipe::cli::stages::run(format, cli.verbose).await,
        Commands::Watch {
            file,
            dialect,
            format,
            debounce,
        } => flowpipe::cli::watch::run(file, dialect, format, debounce, cli.verbose).await,
    }
}
