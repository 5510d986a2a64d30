// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 flowpipe contributors

//! Pipeline stage model
//!
//! Defines the closed set of stage variants a pipeline can be built
//! from, plus the labeled record type the parsers emit. Stages are
//! plain data: once a parser (or the palette) has produced one, its
//! kind and fields never change.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Node package manager used by a `prebuild_node` stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeManager {
    Npm,
    Yarn,
    Pnpm,
}

impl std::fmt::Display for NodeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Npm => write!(f, "npm"),
            Self::Yarn => write!(f, "yarn"),
            Self::Pnpm => write!(f, "pnpm"),
        }
    }
}

/// OS package manager used by a `linux_install` stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsPackageManager {
    Apt,
    Yum,
    Apk,
}

impl std::fmt::Display for OsPackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apt => write!(f, "apt"),
            Self::Yum => write!(f, "yum"),
            Self::Apk => write!(f, "apk"),
        }
    }
}

/// Test flavor carried by a `run_tests` stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    Unit,
    Integration,
    E2e,
}

impl std::fmt::Display for TestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unit => write!(f, "unit"),
            Self::Integration => write!(f, "integration"),
            Self::E2e => write!(f, "e2e"),
        }
    }
}

/// Target environment of a `deploy` stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployEnvironment {
    Production,
    Staging,
}

impl std::fmt::Display for DeployEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Staging => write!(f, "staging"),
        }
    }
}

/// A single typed pipeline stage
///
/// Tagged by `kind` on the wire, with per-variant mandatory fields.
/// All dispatch over stages is exhaustive matching on this enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Stage {
    Start,
    GitClone {
        repo_url: String,
        branch: String,
    },
    LinuxInstall {
        os_pkg: OsPackageManager,
        packages: String,
    },
    PrebuildNode {
        manager: NodeManager,
    },
    PrebuildPython,
    PrebuildJava,
    PrebuildCustom {
        script: String,
    },
    BuildNpm,
    BuildPython,
    BuildJava,
    DockerBuild {
        dockerfile: String,
        tag: String,
    },
    RunTests {
        test_type: TestType,
        command: String,
    },
    Deploy {
        environment: DeployEnvironment,
        deploy_script: String,
    },
    NotifySlack {
        channel: String,
        message: String,
    },
}

/// Fieldless discriminator for [`Stage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Start,
    GitClone,
    LinuxInstall,
    PrebuildNode,
    PrebuildPython,
    PrebuildJava,
    PrebuildCustom,
    BuildNpm,
    BuildPython,
    BuildJava,
    DockerBuild,
    RunTests,
    Deploy,
    NotifySlack,
}

impl StageKind {
    /// Snake-case kind name, identical to the serialized `kind` tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::GitClone => "git_clone",
            Self::LinuxInstall => "linux_install",
            Self::PrebuildNode => "prebuild_node",
            Self::PrebuildPython => "prebuild_python",
            Self::PrebuildJava => "prebuild_java",
            Self::PrebuildCustom => "prebuild_custom",
            Self::BuildNpm => "build_npm",
            Self::BuildPython => "build_python",
            Self::BuildJava => "build_java",
            Self::DockerBuild => "docker_build",
            Self::RunTests => "run_tests",
            Self::Deploy => "deploy",
            Self::NotifySlack => "notify_slack",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Stage {
    /// Discriminator for this stage
    pub fn kind(&self) -> StageKind {
        match self {
            Self::Start => StageKind::Start,
            Self::GitClone { .. } => StageKind::GitClone,
            Self::LinuxInstall { .. } => StageKind::LinuxInstall,
            Self::PrebuildNode { .. } => StageKind::PrebuildNode,
            Self::PrebuildPython => StageKind::PrebuildPython,
            Self::PrebuildJava => StageKind::PrebuildJava,
            Self::PrebuildCustom { .. } => StageKind::PrebuildCustom,
            Self::BuildNpm => StageKind::BuildNpm,
            Self::BuildPython => StageKind::BuildPython,
            Self::BuildJava => StageKind::BuildJava,
            Self::DockerBuild { .. } => StageKind::DockerBuild,
            Self::RunTests { .. } => StageKind::RunTests,
            Self::Deploy { .. } => StageKind::Deploy,
            Self::NotifySlack { .. } => StageKind::NotifySlack,
        }
    }

    /// Human-readable default label for this stage
    ///
    /// Used whenever a record carries no explicit label.
    pub fn default_label(&self) -> String {
        match self {
            Self::Start => "Start".into(),
            Self::GitClone { .. } => "Git Clone".into(),
            Self::LinuxInstall { .. } => "Linux Install".into(),
            Self::PrebuildNode { manager } => format!("Prebuild Node ({manager})"),
            Self::PrebuildPython => "Prebuild Python".into(),
            Self::PrebuildJava => "Prebuild Java".into(),
            Self::PrebuildCustom { .. } => "Prebuild Custom".into(),
            Self::BuildNpm => "Build NPM".into(),
            Self::BuildPython => "Build Python".into(),
            Self::BuildJava => "Build Java".into(),
            Self::DockerBuild { .. } => "Docker Build".into(),
            Self::RunTests { test_type, .. } => format!("Run Tests ({test_type})"),
            Self::Deploy { environment, .. } => format!("Deploy ({environment})"),
            Self::NotifySlack { .. } => "Notify Slack".into(),
        }
    }

    /// The insertable stage palette with default field values
    ///
    /// Every kind except `start`, configured the way the editor's
    /// palette seeds a freshly dropped node.
    pub fn palette() -> Vec<StageRecord> {
        vec![
            StageRecord::new(Stage::GitClone {
                repo_url: "https://github.com/user/repo.git".into(),
                branch: "main".into(),
            }),
            StageRecord::new(Stage::LinuxInstall {
                os_pkg: OsPackageManager::Apt,
                packages: "git curl".into(),
            }),
            StageRecord::new(Stage::PrebuildNode {
                manager: NodeManager::Npm,
            }),
            StageRecord::new(Stage::PrebuildPython),
            StageRecord::new(Stage::PrebuildJava),
            StageRecord::new(Stage::PrebuildCustom {
                script: "echo \"custom prebuild\"".into(),
            }),
            StageRecord::new(Stage::BuildNpm),
            StageRecord::new(Stage::BuildPython),
            StageRecord::new(Stage::BuildJava),
            StageRecord::new(Stage::DockerBuild {
                dockerfile: "Dockerfile".into(),
                tag: "myapp:latest".into(),
            }),
            StageRecord::new(Stage::RunTests {
                test_type: TestType::Unit,
                command: "npm test".into(),
            }),
            StageRecord::new(Stage::Deploy {
                environment: DeployEnvironment::Staging,
                deploy_script: "./deploy.sh".into(),
            }),
            StageRecord::new(Stage::NotifySlack {
                channel: "#deployments".into(),
                message: "Deployment completed!".into(),
            }),
        ]
    }
}

/// A stage plus its optional display label
///
/// This is the unit the parsers emit and the graph layer wraps into
/// nodes. The label is presentation-only; kind and fields are fixed
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(flatten)]
    pub stage: Stage,
}

impl StageRecord {
    /// Record with no explicit label
    pub fn new(stage: Stage) -> Self {
        Self { label: None, stage }
    }

    /// Record with an explicit label
    pub fn labeled(stage: Stage, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            stage,
        }
    }

    /// The label to display, falling back to the kind default
    pub fn display_label(&self) -> Cow<'_, str> {
        match &self.label {
            Some(label) => Cow::Borrowed(label.as_str()),
            None => Cow::Owned(self.stage.default_label()),
        }
    }

    /// Discriminator of the wrapped stage
    pub fn kind(&self) -> StageKind {
        self.stage.kind()
    }
}

impl From<Stage> for StageRecord {
    fn from(stage: Stage) -> Self {
        Self::new(stage)
    }
}
