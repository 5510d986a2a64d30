// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Workflow dialect parser
//!
//! Scans CI-workflow-flavored text line by line and emits an ordered
//! stage sequence. Only three line shapes are recognized — `- name:`,
//! `uses:` and `run:` (inline or `run: |` block) — everything else is
//! ignored, so the input does not have to be valid YAML. The parser
//! is total: any text yields a sequence starting with `start`.

use crate::stage::{Stage, StageRecord};

use super::rules::{classify_run, classify_uses};

/// Parse workflow-dialect text into a stage sequence
pub fn parse(input: &str) -> Vec<StageRecord> {
    let mut stages = vec![StageRecord::labeled(Stage::Start, "Start")];

    let lines: Vec<&str> = input.lines().collect();
    // Name of the currently open step; closed when a `run:` emits
    let mut current_step: Option<String> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();

        if let Some(rest) = line.strip_prefix("- name:") {
            let name: String = rest.trim().chars().filter(|c| !"'\"".contains(*c)).collect();
            current_step = Some(name);
        } else if line == "run: |" {
            // Block form: consume following indented, non-blank lines.
            // Checked before the inline form so `run: |` is never
            // classified as the literal command "|".
            if current_step.is_some() {
                let mut block = Vec::new();
                let mut j = i + 1;
                while j < lines.len() {
                    let raw = lines[j];
                    if raw.trim().is_empty() || !raw.starts_with(' ') {
                        break;
                    }
                    block.push(raw.trim());
                    j += 1;
                }
                let command = block.join("\n");
                stages.push(classify_run(&command, current_step.take().as_deref()));
                i = j;
                continue;
            }
        } else if let Some(rest) = line.strip_prefix("run:") {
            if current_step.is_some() {
                let command = rest.trim();
                stages.push(classify_run(command, current_step.take().as_deref()));
            }
        } else if let Some(rest) = line.strip_prefix("uses:") {
            // A keyword match emits a stage; either way the step stays
            // open so a later `run:` can still use its name
            if current_step.is_some() {
                if let Some(record) = classify_uses(rest.trim()) {
                    stages.push(record);
                }
            }
        }
        // Anything else, including `steps:`, is ignored

        i += 1;
    }

    stages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{NodeManager, StageKind, TestType};

    const BASIC_WORKFLOW: &str = r"name: CI/CD Pipeline
on: [push, pull_request]
jobs:
  pipeline:
    runs-on: ubuntu-latest
    steps:
      - name: Checkout code
        uses: actions/checkout@v3
      - name: Setup Node.js
        uses: actions/setup-node@v3
        with:
          node-version: '18'
      - name: Install dependencies
        run: npm ci
      - name: Run tests
        run: npm test
      - name: Build
        run: npm run build";

    fn kinds(stages: &[StageRecord]) -> Vec<StageKind> {
        stages.iter().map(StageRecord::kind).collect()
    }

    #[test]
    fn test_basic_workflow() {
        let stages = parse(BASIC_WORKFLOW);
        assert_eq!(
            kinds(&stages),
            vec![
                StageKind::Start,
                StageKind::GitClone,
                StageKind::PrebuildNode,
                StageKind::PrebuildNode,
                StageKind::RunTests,
                StageKind::BuildNpm,
            ]
        );
    }

    #[test]
    fn test_starts_with_start_for_any_input() {
        for input in ["", "garbage", "steps:", "::::\n\t\n- name:"] {
            let stages = parse(input);
            assert_eq!(stages[0].stage, Stage::Start);
        }
    }

    #[test]
    fn test_empty_input_is_start_only() {
        let stages = parse("");
        assert_eq!(stages.len(), 1);
    }

    #[test]
    fn test_step_name_quotes_stripped() {
        let input = "- name: \"Deploy 'the' app\"\n  run: make lint";
        let stages = parse(input);
        assert_eq!(stages[1].label.as_deref(), Some("Deploy the app"));
    }

    #[test]
    fn test_run_without_open_step_is_ignored() {
        let stages = parse("run: npm test");
        assert_eq!(stages.len(), 1);
    }

    #[test]
    fn test_uses_without_keyword_keeps_step_open() {
        let input = "- name: Cached build\n  uses: actions/cache@v3\n  run: make all";
        let stages = parse(input);
        // cache@v3 emits nothing; the run still sees the step name
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[1].label.as_deref(), Some("Cached build"));
    }

    #[test]
    fn test_run_closes_step() {
        let input = "- name: First\n  run: make one\n  run: make two";
        let stages = parse(input);
        // Second run has no open step and is dropped
        assert_eq!(stages.len(), 2);
    }

    #[test]
    fn test_block_run_joins_indented_lines() {
        let input = "- name: Ship it\n  run: |\n    docker build -t app .\n    kubectl apply -f k8s/\n";
        let stages = parse(input);
        assert_eq!(stages.len(), 2);
        // The joined block contains "docker build", which outranks
        // deploy in the run table
        assert_eq!(stages[1].kind(), StageKind::DockerBuild);
    }

    #[test]
    fn test_block_run_stops_at_blank_or_dedent() {
        let input = "- name: Deploy\n  run: |\n    kubectl apply -f k8s/\n\n    npm test\n";
        let stages = parse(input);
        // The blank line ends the block; the indented npm test after
        // it belongs to no step and is ignored
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[1].kind(), StageKind::Deploy);

        let input = "- name: Build\n  run: |\n    npm run build\n- name: Next\n  run: npm test";
        let stages = parse(input);
        assert_eq!(
            kinds(&stages),
            vec![StageKind::Start, StageKind::BuildNpm, StageKind::RunTests]
        );
    }

    #[test]
    fn test_block_run_custom_keeps_verbatim_lines() {
        let input = "- name: Provision\n  run: |\n    terraform init\n    terraform apply\n";
        let stages = parse(input);
        assert_eq!(
            stages[1].stage,
            Stage::PrebuildCustom {
                script: "terraform init\nterraform apply".into()
            }
        );
        assert_eq!(stages[1].label.as_deref(), Some("Provision"));
    }

    #[test]
    fn test_inline_run_classification() {
        let input = "- name: Install\n  run: npm ci\n- name: Check\n  run: npm test";
        let stages = parse(input);
        assert_eq!(
            stages[1].stage,
            Stage::PrebuildNode {
                manager: NodeManager::Npm
            }
        );
        assert_eq!(
            stages[2].stage,
            Stage::RunTests {
                test_type: TestType::Unit,
                command: "npm test".into()
            }
        );
    }

    #[test]
    fn test_order_matches_encounter_order() {
        let input = "- name: A\n  run: npm test\n- name: B\n  run: npm ci";
        let stages = parse(input);
        assert_eq!(
            kinds(&stages),
            vec![StageKind::Start, StageKind::RunTests, StageKind::PrebuildNode]
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse(BASIC_WORKFLOW), parse(BASIC_WORKFLOW));
    }
}
