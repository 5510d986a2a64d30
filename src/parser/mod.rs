// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Script-classification engine
//!
//! Two independent text-to-stage parsers, one per supported dialect,
//! plus dialect auto-detection. Both parsers are total functions:
//! every input, however malformed, produces a stage sequence whose
//! first element is `start`.

pub mod rules;
pub mod shell;
pub mod workflow;

use std::path::Path;

use crate::stage::StageRecord;

/// One of the two supported input text formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// CI-workflow-flavored YAML (steps with `uses:`/`run:`)
    Workflow,
    /// POSIX-shell-like command list
    Shell,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Workflow => write!(f, "workflow"),
            Self::Shell => write!(f, "shell"),
        }
    }
}

/// Parse text in the given dialect into an ordered stage sequence
pub fn parse(input: &str, dialect: Dialect) -> Vec<StageRecord> {
    match dialect {
        Dialect::Workflow => workflow::parse(input),
        Dialect::Shell => shell::parse(input),
    }
}

/// Detect the dialect of a script
///
/// Extension first, then content shape. Total: unrecognizable input
/// falls back to shell, since any text is a plausible command list
/// while workflow text is keyed on explicit markers.
pub fn detect_dialect(content: &str, path: Option<&Path>) -> Dialect {
    if let Some(ext) = path.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        match ext.to_lowercase().as_str() {
            "sh" | "bash" => return Dialect::Shell,
            "yaml" | "yml" => return Dialect::Workflow,
            _ => {}
        }
    }

    let trimmed = content.trim_start();
    if trimmed.starts_with("#!") {
        return Dialect::Shell;
    }

    let workflow_markers = ["steps:", "uses:", "- name:", "runs-on:"];
    for line in content.lines() {
        let line = line.trim();
        if workflow_markers.iter().any(|m| line.starts_with(m)) {
            return Dialect::Workflow;
        }
    }

    Dialect::Shell
}
