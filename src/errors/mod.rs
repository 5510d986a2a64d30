// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Error types
//!
//! The parsing and sequencing core is total and has no failure path;
//! these errors belong to the CLI layer around it: reading input
//! files, expanding glob patterns, serializing output, watching for
//! changes.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for flowpipe operations
pub type FlowpipeResult<T> = Result<T, FlowpipeError>;

/// Main error type for flowpipe
#[derive(Error, Debug, Diagnostic)]
pub enum FlowpipeError {
    #[error("Script file not found: {path}")]
    #[diagnostic(
        code(flowpipe::script_not_found),
        help("Check the path, or pass a glob pattern that matches existing files")
    )]
    ScriptNotFound { path: PathBuf },

    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(flowpipe::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("No input files matched pattern: {pattern}")]
    #[diagnostic(
        code(flowpipe::no_input_files),
        help("Check that files matching '{pattern}' exist")
    )]
    NoInputFiles { pattern: String },

    #[error("Glob pattern error: {message}")]
    #[diagnostic(code(flowpipe::glob_error))]
    GlobPattern { message: String },

    #[error("Watch error: {message}")]
    #[diagnostic(
        code(flowpipe::watch_error),
        help("The watched file may have been removed, or the platform watcher is unavailable")
    )]
    Watch { message: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(flowpipe::io_error))]
    Io { message: String },

    #[error("JSON serialization error: {message}")]
    #[diagnostic(code(flowpipe::json_error))]
    Json { message: String },

    #[error("YAML serialization error: {message}")]
    #[diagnostic(code(flowpipe::yaml_error))]
    Yaml { message: String },
}

impl From<std::io::Error> for FlowpipeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_json::Error> for FlowpipeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for FlowpipeError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<glob::PatternError> for FlowpipeError {
    fn from(e: glob::PatternError) -> Self {
        Self::GlobPattern { message: e.to_string() }
    }
}

impl From<notify::Error> for FlowpipeError {
    fn from(e: notify::Error) -> Self {
        Self::Watch { message: e.to_string() }
    }
}
