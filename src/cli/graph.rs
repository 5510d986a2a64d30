// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Graph command - render a script as a sequenced stage graph

use miette::Result;
use std::path::PathBuf;

use crate::errors::FlowpipeError;
use crate::graph::FlowGraph;
use crate::parser;

use super::{DialectArg, GraphFormat};

/// Run the graph command
pub async fn run(
    file: PathBuf,
    dialect: DialectArg,
    format: GraphFormat,
    verbose: bool,
) -> Result<()> {
    if !file.exists() {
        return Err(FlowpipeError::ScriptNotFound { path: file }.into());
    }

    let content = tokio::fs::read_to_string(&file).await.map_err(|e| {
        FlowpipeError::FileReadError {
            path: file.clone(),
            error: e.to_string(),
        }
    })?;

    let resolved = dialect.resolve(&content, Some(&file));
    let stages = parser::parse(&content, resolved);

    let mut graph = FlowGraph::new();
    graph.load_stages(&stages);

    if verbose {
        tracing::info!(
            dialect = %resolved,
            nodes = graph.nodes().len(),
            edges = graph.edges().len(),
            "assembled stage graph"
        );
    }

    let output = match format {
        GraphFormat::Text => graph.to_text(),
        GraphFormat::Mermaid => graph.to_mermaid(),
        GraphFormat::Dot => graph.to_dot(),
        GraphFormat::Json => {
            serde_json::to_string_pretty(&graph).map_err(FlowpipeError::from)?
        }
    };

    println!("{}", output);

    Ok(())
}
