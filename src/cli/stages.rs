// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Stages command - list the insertable stage palette

use miette::Result;

use crate::errors::FlowpipeError;
use crate::stage::Stage;
use crate::utils::colors;

use super::OutputFormat;

/// Run the stages command
pub async fn run(format: OutputFormat, verbose: bool) -> Result<()> {
    let palette = Stage::palette();

    match format {
        OutputFormat::Text => {
            colors::print_header("Stage palette");
            for record in &palette {
                colors::print_bullet(&format!(
                    "{} ({})",
                    record.display_label(),
                    colors::stage_kind(record.kind())
                ));
                if verbose {
                    if let Ok(fields) = serde_json::to_string(record) {
                        println!("    {}", colors::dimmed(&fields));
                    }
                }
            }
        }
        OutputFormat::Json => {
            let out = serde_json::to_string_pretty(&palette).map_err(FlowpipeError::from)?;
            println!("{}", out);
        }
        OutputFormat::Yaml => {
            let out = serde_yaml::to_string(&palette).map_err(FlowpipeError::from)?;
            print!("{}", out);
        }
    }

    Ok(())
}
