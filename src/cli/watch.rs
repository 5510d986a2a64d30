// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Watch command - re-render the stage graph on file changes

use colored::Colorize;
use miette::Result;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::errors::FlowpipeError;
use crate::graph::FlowGraph;
use crate::parser;

use super::{DialectArg, GraphFormat};

/// Run the watch command
pub async fn run(
    file: PathBuf,
    dialect: DialectArg,
    format: GraphFormat,
    debounce_ms: u64,
    verbose: bool,
) -> Result<()> {
    if !file.exists() {
        return Err(FlowpipeError::ScriptNotFound { path: file }.into());
    }

    println!("{}", "Starting watch mode...".bold());
    println!(
        "Watching {} (debounce: {}ms)",
        file.display(),
        debounce_ms
    );
    println!("Press {} to exit.", "Ctrl+C".cyan());
    println!();

    // Create channel for receiving events
    let (tx, rx) = channel();

    // Create debounced watcher over the file's directory; editors
    // often replace the file instead of writing in place
    let mut debouncer = new_debouncer(Duration::from_millis(debounce_ms), tx)
        .map_err(FlowpipeError::from)?;

    let watch_root = file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    debouncer
        .watcher()
        .watch(watch_root, RecursiveMode::NonRecursive)
        .map_err(FlowpipeError::from)?;

    // Initial render
    let mut last_hash = render(&file, dialect, format, verbose).await;

    // Watch for changes
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    matches!(e.kind, DebouncedEventKind::Any)
                        && e.path.file_name() == file.file_name()
                });
                if !relevant {
                    continue;
                }

                println!();
                println!("{}", "─".repeat(50).dimmed());
                println!("{}: {}", "Change detected".yellow(), file.display());
                println!();

                if let Some((content, hash)) = read_and_hash(&file).await {
                    if last_hash.as_deref() == Some(hash.as_str()) {
                        println!("{}", "Content unchanged, skipping".dimmed());
                    } else {
                        render_content(&file, &content, dialect, format, verbose);
                        last_hash = Some(hash);
                    }
                }
            }
            Ok(Err(e)) => {
                eprintln!("{}: {:?}", "Watch error".red(), e);
            }
            Err(e) => {
                // Channel closed
                eprintln!("{}: {}", "Channel error".red(), e);
                break;
            }
        }
    }

    Ok(())
}

/// Render unconditionally, returning the content hash on success
async fn render(
    file: &Path,
    dialect: DialectArg,
    format: GraphFormat,
    verbose: bool,
) -> Option<String> {
    let (content, hash) = read_and_hash(file).await?;
    render_content(file, &content, dialect, format, verbose);
    Some(hash)
}

/// Read the script and compute its BLAKE3 content key
async fn read_and_hash(file: &Path) -> Option<(String, String)> {
    match tokio::fs::read_to_string(file).await {
        Ok(content) => {
            let hash = blake3::hash(content.as_bytes()).to_hex().to_string();
            Some((content, hash))
        }
        Err(e) => {
            eprintln!("{}: {}", "Failed to read script".red(), e);
            None
        }
    }
}

fn render_content(
    file: &Path,
    content: &str,
    dialect: DialectArg,
    format: GraphFormat,
    verbose: bool,
) {
    let start = std::time::Instant::now();

    let resolved = dialect.resolve(content, Some(file));
    let stages = parser::parse(content, resolved);

    let mut graph = FlowGraph::new();
    graph.load_stages(&stages);

    let output = match format {
        GraphFormat::Text => graph.to_text(),
        GraphFormat::Mermaid => graph.to_mermaid(),
        GraphFormat::Dot => graph.to_dot(),
        GraphFormat::Json => serde_json::to_string_pretty(&graph).unwrap_or_default(),
    };
    println!("{}", output);

    let elapsed = start.elapsed();
    if verbose {
        println!(
            "{}",
            format!(
                "{} stages, {} edges ({:.2}ms)",
                graph.nodes().len(),
                graph.edges().len(),
                elapsed.as_secs_f64() * 1000.0
            )
            .dimmed()
        );
    }
}
