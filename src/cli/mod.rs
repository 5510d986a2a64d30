// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for flowpipe.

pub mod graph;
pub mod parse;
pub mod stages;
pub mod watch;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::parser::Dialect;

/// Pipeline script classifier and stage-graph sequencer
#[derive(Parser, Debug)]
#[clap(
    name = "flowpipe",
    version,
    about = "Classify CI workflow and shell scripts into typed stage graphs",
    long_about = None,
    after_help = "Examples:\n\
        flowpipe parse ci.sh                Classify a script into stages\n\
        flowpipe graph ci.yml -f mermaid    Render the sequenced stage graph\n\
        flowpipe stages                     List the insertable stage palette\n\
        flowpipe watch deploy.sh            Re-render on every change\n\n\
        See 'flowpipe <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify scripts into ordered stage sequences
    Parse {
        /// Script files or glob patterns
        files: Vec<PathBuf>,

        /// Input dialect (default: detect per file)
        #[clap(short, long, value_enum, default_value_t = DialectArg::Auto)]
        dialect: DialectArg,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Build and render the sequenced stage graph of a script
    Graph {
        /// Script file
        file: PathBuf,

        /// Input dialect (default: detect)
        #[clap(short, long, value_enum, default_value_t = DialectArg::Auto)]
        dialect: DialectArg,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = GraphFormat::Text)]
        format: GraphFormat,
    },

    /// List the insertable stage palette
    Stages {
        /// Output format
        #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Watch a script and re-render its graph on changes
    Watch {
        /// Script file
        file: PathBuf,

        /// Input dialect (default: detect)
        #[clap(short, long, value_enum, default_value_t = DialectArg::Auto)]
        dialect: DialectArg,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = GraphFormat::Text)]
        format: GraphFormat,

        /// Debounce delay in milliseconds
        #[clap(long, default_value = "500")]
        debounce: u64,
    },
}

/// Dialect selection: forced, or detected per input
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectArg {
    Auto,
    Workflow,
    Shell,
}

impl DialectArg {
    /// Resolve to a concrete dialect for one input
    pub fn resolve(self, content: &str, path: Option<&std::path::Path>) -> Dialect {
        match self {
            Self::Auto => crate::parser::detect_dialect(content, path),
            Self::Workflow => Dialect::Workflow,
            Self::Shell => Dialect::Shell,
        }
    }
}

/// Output format for parse/stages commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Graph output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Text,
    Mermaid,
    Dot,
    Json,
}
