// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Parse command - classify scripts into stage sequences

use colored::Colorize;
use miette::Result;
use std::path::{Path, PathBuf};

use crate::errors::{FlowpipeError, FlowpipeResult};
use crate::parser;
use crate::stage::StageRecord;
use crate::utils::colors;

use super::{DialectArg, OutputFormat};

/// Run the parse command
pub async fn run(
    files: Vec<PathBuf>,
    dialect: DialectArg,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    if files.is_empty() {
        return Err(miette::miette!(
            "No input files\n\n\
             Pass one or more script files or glob patterns, e.g. 'flowpipe parse ci.sh'."
        ));
    }

    let inputs = expand_inputs(&files)?;
    let mut parsed: Vec<(PathBuf, Vec<StageRecord>)> = Vec::new();

    for path in inputs {
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            FlowpipeError::FileReadError {
                path: path.clone(),
                error: e.to_string(),
            }
        })?;

        let resolved = dialect.resolve(&content, Some(&path));
        tracing::debug!(file = %path.display(), dialect = %resolved, "classifying script");
        parsed.push((path, parser::parse(&content, resolved)));
    }

    match format {
        OutputFormat::Text => {
            for (path, stages) in &parsed {
                print_text(path, stages, verbose);
            }
        }
        OutputFormat::Json => {
            let out = match parsed.as_slice() {
                [(_, stages)] => serde_json::to_string_pretty(stages),
                _ => serde_json::to_string_pretty(&to_map(&parsed)),
            }
            .map_err(FlowpipeError::from)?;
            println!("{}", out);
        }
        OutputFormat::Yaml => {
            let out = match parsed.as_slice() {
                [(_, stages)] => serde_yaml::to_string(stages),
                _ => serde_yaml::to_string(&to_map(&parsed)),
            }
            .map_err(FlowpipeError::from)?;
            print!("{}", out);
        }
    }

    Ok(())
}

/// Expand file arguments, treating any argument containing glob
/// metacharacters as a pattern
pub fn expand_inputs(files: &[PathBuf]) -> FlowpipeResult<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for file in files {
        let spec = file.to_string_lossy();
        if spec.contains(['*', '?', '[']) {
            let mut matched = false;
            for entry in glob::glob(&spec)?.flatten() {
                inputs.push(entry);
                matched = true;
            }
            if !matched {
                return Err(FlowpipeError::NoInputFiles {
                    pattern: spec.into_owned(),
                });
            }
        } else if file.exists() {
            inputs.push(file.clone());
        } else {
            return Err(FlowpipeError::ScriptNotFound { path: file.clone() });
        }
    }

    Ok(inputs)
}

fn to_map(parsed: &[(PathBuf, Vec<StageRecord>)]) -> serde_json::Map<String, serde_json::Value> {
    parsed
        .iter()
        .map(|(path, stages)| {
            (
                path.display().to_string(),
                serde_json::to_value(stages).unwrap_or_default(),
            )
        })
        .collect()
}

fn print_text(path: &Path, stages: &[StageRecord], verbose: bool) {
    colors::print_header(&path.display().to_string());
    for (i, record) in stages.iter().enumerate() {
        colors::print_numbered(
            i + 1,
            &format!(
                "{} ({})",
                record.display_label(),
                colors::stage_kind(record.kind())
            ),
        );
        if verbose {
            if let Ok(fields) = serde_json::to_string(record) {
                println!("     {}", fields.dimmed());
            }
        }
    }
    println!();
}
