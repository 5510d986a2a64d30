// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Shell dialect parser
//!
//! Classifies a shell-like script line by line, with no cross-line
//! state: after the skip table drops noise lines, every remaining
//! line maps to exactly one stage via the ordered rule table. No real
//! shell semantics are applied. Total: any text yields a sequence
//! starting with `start`.

use crate::stage::{Stage, StageRecord};

use super::rules::{classify_shell, shell_should_skip};

/// Parse shell-dialect text into a stage sequence
pub fn parse(input: &str) -> Vec<StageRecord> {
    let mut stages = vec![StageRecord::labeled(Stage::Start, "Start")];

    for line in input.lines() {
        let line = line.trim();
        if shell_should_skip(line) {
            continue;
        }
        stages.push(classify_shell(line));
    }

    stages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{NodeManager, StageKind};

    const BASIC_SCRIPT: &str = r#"#!/bin/bash
set -e

echo "Starting CI/CD Pipeline"

# Install dependencies
npm ci

# Run tests
npm test

# Build
npm run build

echo "Pipeline completed successfully"
"#;

    fn kinds(stages: &[StageRecord]) -> Vec<StageKind> {
        stages.iter().map(StageRecord::kind).collect()
    }

    #[test]
    fn test_basic_script() {
        let stages = parse(BASIC_SCRIPT);
        assert_eq!(
            kinds(&stages),
            vec![
                StageKind::Start,
                StageKind::PrebuildNode,
                StageKind::RunTests,
                StageKind::BuildNpm,
            ]
        );
    }

    #[test]
    fn test_starts_with_start_for_any_input() {
        for input in ["", "???", "git clone", "#!/bin/sh\nls"] {
            let stages = parse(input);
            assert_eq!(stages[0].stage, Stage::Start);
        }
    }

    #[test]
    fn test_noise_only_input_is_start_only() {
        let input = "#!/bin/bash\nset -euo pipefail\n\n# nothing here\necho done\n";
        let stages = parse(input);
        assert_eq!(stages.len(), 1);
        assert_eq!(stages[0].stage, Stage::Start);
    }

    #[test]
    fn test_git_clone_with_branch() {
        let stages = parse("git clone -b dev https://x/y.git");
        assert_eq!(
            stages[1].stage,
            Stage::GitClone {
                repo_url: "https://x/y.git".into(),
                branch: "dev".into(),
            }
        );
    }

    #[test]
    fn test_one_stage_per_line() {
        let input = "npm ci\nnpm ci\nnpm ci";
        let stages = parse(input);
        // No dedup: three identical lines are three stages
        assert_eq!(stages.len(), 4);
    }

    #[test]
    fn test_order_matches_encounter_order() {
        let input = "./deploy.sh\nyarn install\nmvn package";
        let stages = parse(input);
        assert_eq!(
            kinds(&stages),
            vec![
                StageKind::Start,
                StageKind::Deploy,
                StageKind::PrebuildNode,
                StageKind::BuildJava,
            ]
        );
        assert_eq!(
            stages[2].stage,
            Stage::PrebuildNode {
                manager: NodeManager::Yarn
            }
        );
    }

    #[test]
    fn test_unrecognized_line_degrades_to_custom() {
        let stages = parse("cargo build --release");
        assert_eq!(
            stages[1].stage,
            Stage::PrebuildCustom {
                script: "cargo build --release".into()
            }
        );
    }

    #[test]
    fn test_indented_lines_are_trimmed_before_classification() {
        let stages = parse("  \t  npm test  ");
        assert_eq!(
            stages[1].stage,
            Stage::RunTests {
                test_type: crate::stage::TestType::Unit,
                command: "npm test".into(),
            }
        );
    }

    #[test]
    fn test_full_pipeline_script() {
        let input = r#"#!/bin/bash
set -e
git clone -b main https://github.com/acme/web.git
sudo apt-get install -y curl
npm ci
npm test
npm run build
docker build -t acme/web:latest .
kubectl apply -f k8s/
curl -X POST https://hooks.slack.com/services/T0/B0
"#;
        let stages = parse(input);
        assert_eq!(
            kinds(&stages),
            vec![
                StageKind::Start,
                StageKind::GitClone,
                StageKind::LinuxInstall,
                StageKind::PrebuildNode,
                StageKind::RunTests,
                StageKind::BuildNpm,
                StageKind::DockerBuild,
                StageKind::Deploy,
                StageKind::NotifySlack,
            ]
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse(BASIC_SCRIPT), parse(BASIC_SCRIPT));
    }
}
