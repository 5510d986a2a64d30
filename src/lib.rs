// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! # flowpipe - Pipeline Script Classifier & Stage-Graph Sequencer
//!
//! `flowpipe` turns free-form CI pipeline descriptions into typed stage
//! graphs and keeps their sequence labels consistent as they change.
//!
//! ## Features
//!
//! - **Two dialects** - Workflow-YAML-like and shell-like scripts
//! - **Total parsers** - Any input yields a valid stage sequence
//! - **Graph sequencing** - Auto-connected stages with a labeled main path
//! - **Diagram output** - Text, Mermaid, DOT, or JSON
//!
//! ## Quick Start
//!
//! ```bash
//! # Classify a script into stages
//! flowpipe parse ci.sh
//!
//! # Render the stage graph
//! flowpipe graph .github/workflows/ci.yml --format mermaid
//!
//! # List the insertable stage palette
//! flowpipe stages
//!
//! # Re-render on every change
//! flowpipe watch deploy.sh
//! ```

pub mod cli;
pub mod errors;
pub mod graph;
pub mod parser;
pub mod stage;
pub mod utils;

// Re-export commonly used types
pub use errors::{FlowpipeError, FlowpipeResult};
pub use graph::{FlowGraph, GraphEdge, GraphNode};
pub use parser::Dialect;
pub use stage::{Stage, StageKind, StageRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
