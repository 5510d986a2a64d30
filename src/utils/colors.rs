// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Terminal color utilities
//!
//! Consistent styling across the CLI: stage kinds are colored by
//! pipeline phase so a listing reads at a glance.

use colored::{ColoredString, Colorize};

use crate::stage::StageKind;

/// Color a stage kind name by its pipeline phase
pub fn stage_kind(kind: StageKind) -> ColoredString {
    let name = kind.as_str();
    match kind {
        StageKind::Start => name.bold(),
        StageKind::GitClone => name.cyan(),
        StageKind::LinuxInstall
        | StageKind::PrebuildNode
        | StageKind::PrebuildPython
        | StageKind::PrebuildJava
        | StageKind::PrebuildCustom => name.blue(),
        StageKind::BuildNpm
        | StageKind::BuildPython
        | StageKind::BuildJava
        | StageKind::DockerBuild => name.magenta(),
        StageKind::RunTests => name.yellow(),
        StageKind::Deploy => name.green(),
        StageKind::NotifySlack => name.purple(),
    }
}

/// Style for dimmed/secondary text
pub fn dimmed(msg: &str) -> ColoredString {
    msg.dimmed()
}

/// Print a styled header
pub fn print_header(title: &str) {
    println!("{}", title.bold());
    println!("{}", "═".repeat(title.len().max(40)));
}

/// Print a numbered item
pub fn print_numbered(num: usize, content: &str) {
    println!("  {}. {}", num, content);
}

/// Print a bullet point
pub fn print_bullet(content: &str) {
    println!("  • {}", content);
}
