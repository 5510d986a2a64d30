// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Ordered classification tables
//!
//! Both dialects classify text by "first substring match wins". The
//! priority order is the contract, so each table is an explicit slice
//! of (predicate, constructor) pairs evaluated in sequence rather
//! than a nested conditional. Constructors never fail: any field that
//! cannot be extracted falls back to a fixed default.

use regex::Regex;

use crate::stage::{
    DeployEnvironment, NodeManager, OsPackageManager, Stage, StageRecord, TestType,
};

pub const DEFAULT_REPO_URL: &str = "https://github.com/user/repo.git";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_PACKAGES: &str = "git curl";
pub const DEFAULT_DOCKERFILE: &str = "Dockerfile";
pub const DEFAULT_IMAGE_TAG: &str = "myapp:latest";
pub const DEFAULT_SLACK_CHANNEL: &str = "#deployments";
pub const DEFAULT_SLACK_MESSAGE: &str = "Deployment completed!";
pub const CUSTOM_COMMAND_LABEL: &str = "Custom Command";

/// Capture group 1 of `pattern` in `text`, or None
///
/// The patterns here are fixed literals; a pattern that fails to
/// compile behaves like a pattern that did not match, keeping the
/// classifiers total.
fn capture(pattern: &str, text: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)?.get(1).map(|m| m.as_str().to_string())
}

/// Substring match that must start at a word boundary
///
/// Keeps `npm install` from also claiming `pnpm install` lines.
fn contains_command(line: &str, needle: &str) -> bool {
    line.match_indices(needle).any(|(idx, _)| {
        idx == 0
            || line[..idx]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_alphanumeric())
    })
}

// ─────────────────────────────────────────────────────────────────────────
// Workflow `uses:` keyword table
// ─────────────────────────────────────────────────────────────────────────

/// Maps a `uses:` action keyword to a stage
pub struct UsesRule {
    /// Substring of the action value that triggers this rule
    pub keyword: &'static str,
    pub build: fn() -> StageRecord,
}

/// Keyword table for workflow `uses:` lines, in priority order
pub const USES_RULES: &[UsesRule] = &[
    UsesRule {
        keyword: "checkout",
        build: || {
            StageRecord::labeled(
                Stage::GitClone {
                    repo_url: DEFAULT_REPO_URL.into(),
                    branch: DEFAULT_BRANCH.into(),
                },
                "Git Clone",
            )
        },
    },
    UsesRule {
        keyword: "setup-node",
        build: || {
            StageRecord::labeled(
                Stage::PrebuildNode {
                    manager: NodeManager::Npm,
                },
                "Prebuild Node",
            )
        },
    },
    UsesRule {
        keyword: "setup-python",
        build: || StageRecord::labeled(Stage::PrebuildPython, "Prebuild Python"),
    },
    UsesRule {
        keyword: "setup-java",
        build: || StageRecord::labeled(Stage::PrebuildJava, "Prebuild Java"),
    },
];

/// Classify a `uses:` action value, if any keyword matches
pub fn classify_uses(action: &str) -> Option<StageRecord> {
    USES_RULES
        .iter()
        .find(|rule| action.contains(rule.keyword))
        .map(|rule| (rule.build)())
}

// ─────────────────────────────────────────────────────────────────────────
// Workflow `run:` command table
// ─────────────────────────────────────────────────────────────────────────

/// Maps a `run:` command (inline or joined block) to a stage
pub struct RunRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub build: fn(&str) -> StageRecord,
}

/// Command table for workflow `run:` values, in priority order
pub const RUN_RULES: &[RunRule] = &[
    RunRule {
        name: "node-install",
        matches: |cmd| cmd.contains("npm ci") || cmd.contains("npm install"),
        build: |_| {
            StageRecord::labeled(
                Stage::PrebuildNode {
                    manager: NodeManager::Npm,
                },
                "Install Dependencies",
            )
        },
    },
    RunRule {
        name: "test",
        matches: |cmd| cmd.contains("npm test") || cmd.contains("yarn test"),
        build: |cmd| {
            StageRecord::labeled(
                Stage::RunTests {
                    test_type: TestType::Unit,
                    command: cmd.to_string(),
                },
                "Run Tests",
            )
        },
    },
    RunRule {
        name: "npm-build",
        matches: |cmd| cmd.contains("npm run build") || cmd.contains("yarn build"),
        build: |_| StageRecord::labeled(Stage::BuildNpm, "Build NPM"),
    },
    RunRule {
        name: "docker-build",
        matches: |cmd| cmd.contains("docker build"),
        build: |_| {
            StageRecord::labeled(
                Stage::DockerBuild {
                    dockerfile: DEFAULT_DOCKERFILE.into(),
                    tag: DEFAULT_IMAGE_TAG.into(),
                },
                "Docker Build",
            )
        },
    },
    RunRule {
        name: "deploy",
        matches: |cmd| cmd.contains("deploy") || cmd.contains("kubectl"),
        build: |cmd| {
            StageRecord::labeled(
                Stage::Deploy {
                    environment: DeployEnvironment::Production,
                    deploy_script: cmd.to_string(),
                },
                "Deploy",
            )
        },
    },
];

/// Classify a `run:` command; no match degrades to a custom stage
/// labeled with the step name
pub fn classify_run(command: &str, step_name: Option<&str>) -> StageRecord {
    if let Some(rule) = RUN_RULES.iter().find(|rule| (rule.matches)(command)) {
        return (rule.build)(command);
    }

    let label = step_name
        .filter(|name| !name.is_empty())
        .unwrap_or(CUSTOM_COMMAND_LABEL);
    StageRecord::labeled(
        Stage::PrebuildCustom {
            script: command.to_string(),
        },
        label,
    )
}

// ─────────────────────────────────────────────────────────────────────────
// Shell line table
// ─────────────────────────────────────────────────────────────────────────

/// Skip predicates for shell lines, evaluated before classification
///
/// The shebang entry is listed for completeness even though the
/// comment rule also covers it.
pub const SHELL_SKIP: &[fn(&str) -> bool] = &[
    |line| line.is_empty(),
    |line| line.starts_with("#!/"),
    |line| line.starts_with('#'),
    |line| line.starts_with("set "),
    |line| line.starts_with("echo "),
];

/// True if a trimmed shell line should be dropped without a stage
pub fn shell_should_skip(line: &str) -> bool {
    SHELL_SKIP.iter().any(|skip| skip(line))
}

/// Maps one trimmed shell line to a stage
pub struct ShellRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub build: fn(&str) -> StageRecord,
}

/// Line table for shell scripts, in priority order; the final rule is
/// the catch-all custom-command fallback
pub const SHELL_RULES: &[ShellRule] = &[
    ShellRule {
        name: "git-clone",
        matches: |line| line.contains("git clone"),
        build: |line| {
            let repo_url = capture(r"git clone.*?(\S+\.git)", line)
                .unwrap_or_else(|| DEFAULT_REPO_URL.into());
            let branch =
                capture(r"-b\s+(\S+)", line).unwrap_or_else(|| DEFAULT_BRANCH.into());
            StageRecord::labeled(Stage::GitClone { repo_url, branch }, "Git Clone")
        },
    },
    ShellRule {
        name: "apt-install",
        matches: |line| line.contains("apt-get install"),
        build: |line| {
            let packages = capture(r"apt-get install\s+(.+)", line)
                .map(|p| p.trim().to_string())
                .unwrap_or_else(|| DEFAULT_PACKAGES.into());
            StageRecord::labeled(
                Stage::LinuxInstall {
                    os_pkg: OsPackageManager::Apt,
                    packages,
                },
                "Linux Install",
            )
        },
    },
    ShellRule {
        name: "npm-install",
        matches: |line| {
            contains_command(line, "npm ci") || contains_command(line, "npm install")
        },
        build: |_| node_install(NodeManager::Npm),
    },
    ShellRule {
        name: "yarn-install",
        matches: |line| line.contains("yarn install"),
        build: |_| node_install(NodeManager::Yarn),
    },
    ShellRule {
        name: "pnpm-install",
        matches: |line| line.contains("pnpm install"),
        build: |_| node_install(NodeManager::Pnpm),
    },
    ShellRule {
        name: "pip-install",
        matches: |line| line.contains("pip install"),
        build: |_| StageRecord::labeled(Stage::PrebuildPython, "Prebuild Python"),
    },
    ShellRule {
        name: "test",
        matches: |line| line.contains("npm test") || line.contains("yarn test"),
        build: |line| {
            StageRecord::labeled(
                Stage::RunTests {
                    test_type: TestType::Unit,
                    command: line.to_string(),
                },
                "Run Tests",
            )
        },
    },
    ShellRule {
        name: "npm-build",
        matches: |line| line.contains("npm run build") || line.contains("yarn build"),
        build: |_| StageRecord::labeled(Stage::BuildNpm, "Build NPM"),
    },
    ShellRule {
        name: "python-build",
        matches: |line| line.contains("python setup.py build"),
        build: |_| StageRecord::labeled(Stage::BuildPython, "Build Python"),
    },
    ShellRule {
        name: "java-build",
        matches: |line| line.contains("mvn package") || line.contains("gradle build"),
        build: |_| StageRecord::labeled(Stage::BuildJava, "Build Java"),
    },
    ShellRule {
        name: "docker-build",
        matches: |line| line.contains("docker build"),
        build: |line| {
            let dockerfile = capture(r"-f\s+(\S+)", line)
                .unwrap_or_else(|| DEFAULT_DOCKERFILE.into());
            let tag =
                capture(r"-t\s+(\S+)", line).unwrap_or_else(|| DEFAULT_IMAGE_TAG.into());
            StageRecord::labeled(Stage::DockerBuild { dockerfile, tag }, "Docker Build")
        },
    },
    ShellRule {
        name: "deploy",
        matches: |line| {
            line.contains("deploy") || line.contains("kubectl") || line.contains("./deploy")
        },
        build: |line| {
            StageRecord::labeled(
                Stage::Deploy {
                    environment: DeployEnvironment::Production,
                    deploy_script: line.to_string(),
                },
                "Deploy",
            )
        },
    },
    ShellRule {
        name: "slack-notify",
        matches: |line| line.contains("curl") && line.contains("slack"),
        build: |_| {
            StageRecord::labeled(
                Stage::NotifySlack {
                    channel: DEFAULT_SLACK_CHANNEL.into(),
                    message: DEFAULT_SLACK_MESSAGE.into(),
                },
                "Notify Slack",
            )
        },
    },
    ShellRule {
        name: "custom",
        matches: |_| true,
        build: |line| {
            StageRecord::labeled(
                Stage::PrebuildCustom {
                    script: line.to_string(),
                },
                CUSTOM_COMMAND_LABEL,
            )
        },
    },
];

fn node_install(manager: NodeManager) -> StageRecord {
    StageRecord::labeled(Stage::PrebuildNode { manager }, "Install Dependencies")
}

/// Classify one trimmed, non-skipped shell line; first rule wins
pub fn classify_shell(line: &str) -> StageRecord {
    // The final catch-all rule guarantees a match
    let rule = SHELL_RULES
        .iter()
        .find(|rule| (rule.matches)(line))
        .unwrap_or(&SHELL_RULES[SHELL_RULES.len() - 1]);
    (rule.build)(line)
}
