//! Configuration for liftoff
//!
//! Searched in order: liftoff.toml, .liftoff.toml, .config/liftoff.toml.
//! The `[[steps]]` array defines the pipeline; when it is absent a default
//! pipeline mirroring the stock release procedure is used. Step parameters
//! are validated lazily: failures surface only when a step executes.

use crate::core::error::{ConfigError, LiftError, LiftResult};
use crate::core::step::Step;
use crate::steps;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiftConfig {
  pub project: ProjectConfig,
  #[serde(default)]
  pub log: LogConfig,
  #[serde(default)]
  pub steps: Vec<StepSpec>,
}

/// Release parameters shared by multiple steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
  /// Package name, available as `{name}` in command templates
  pub name: String,

  /// Only release new versions from this git branch
  #[serde(default = "default_branch")]
  pub branch: String,

  /// File carrying the quoted version assignment
  #[serde(default = "default_version_file")]
  pub version_file: PathBuf,

  /// Key of the version assignment in that file
  #[serde(default = "default_version_keyword")]
  pub version_keyword: String,

  /// Changelog file checked before releasing
  #[serde(default = "default_changelog")]
  pub changelog: PathBuf,
}

fn default_branch() -> String {
  "main".to_string()
}

fn default_version_file() -> PathBuf {
  PathBuf::from("Cargo.toml")
}

fn default_version_keyword() -> String {
  "version".to_string()
}

fn default_changelog() -> PathBuf {
  PathBuf::from("CHANGELOG.md")
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self {
      name: String::new(),
      branch: default_branch(),
      version_file: default_version_file(),
      version_keyword: default_version_keyword(),
      changelog: default_changelog(),
    }
  }
}

/// Log sink settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
  /// Log file, truncated per run; receives everything at debug level
  #[serde(default = "default_log_file")]
  pub file: PathBuf,

  /// Screen verbosity: debug | info | warn | error
  #[serde(default = "default_verbosity")]
  pub verbosity: String,
}

fn default_log_file() -> PathBuf {
  PathBuf::from("release.log")
}

fn default_verbosity() -> String {
  "info".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      file: default_log_file(),
      verbosity: default_verbosity(),
    }
  }
}

/// Which of the run's versions a step refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VersionKind {
  /// The version being released
  #[default]
  Release,
  /// The next development version derived from it
  Development,
}

/// One configured pipeline entry
///
/// # Example
///
/// ```toml
/// [[steps]]
/// kind = "shell"
/// command = "cargo test"
///
/// [[steps]]
/// kind = "upload"
/// command = "cargo publish"
/// expect = "Uploading"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StepSpec {
  /// Run a shell command (`{name}` and `{version}` are expanded)
  Shell {
    command: String,
    #[serde(default = "default_true")]
    stop_on_failure: bool,
  },

  /// Interactive: has the changelog been updated?
  ConfirmChangelog,

  /// The changelog file must exist and carry the pending-release marker
  CheckChangelog {
    #[serde(default)]
    marker: Option<String>,
  },

  /// Build the artifact, then let the operator verify its contents
  ApproveArtifact { command: String },

  /// Read the current version, ask for the new one, write it to the file
  SetVersion,

  /// Upload the artifact; exit code zero plus an optional expected output
  /// substring decide success
  Upload {
    command: String,
    #[serde(default)]
    expect: Option<String>,
  },

  /// Write the next development version to the versioned file
  SetFutureVersion,

  /// The current git branch must match the configured branch
  EnsureBranch,

  /// No detached head, no uncommitted changes in tracked files
  EnsureClean,

  /// Commit the release (or development) version number
  CommitVersion {
    #[serde(default)]
    which: VersionKind,
    #[serde(default)]
    message: Option<String>,
    #[serde(default = "default_true")]
    stop_on_failure: bool,
  },

  /// Tag the current commit with the new version number
  Tag,

  /// `git push` — cannot be undone
  Push,

  /// Push local tags to the remote
  PushTags,

  /// Query a CI status endpoint (`{branch}` is expanded)
  CheckCi {
    url: String,
    #[serde(default)]
    expect: Option<String>,
  },

  /// Print a warning and continue
  Warn { message: String },
}

fn default_true() -> bool {
  true
}

impl StepSpec {
  /// Instantiate the configured step
  pub fn build(&self) -> Box<dyn Step> {
    match self.clone() {
      StepSpec::Shell {
        command,
        stop_on_failure,
      } => Box::new(steps::Shell::new(command, stop_on_failure)),
      StepSpec::ConfirmChangelog => Box::new(steps::ConfirmChangelog::new()),
      StepSpec::CheckChangelog { marker } => Box::new(steps::CheckChangelog::new(marker)),
      StepSpec::ApproveArtifact { command } => Box::new(steps::ApproveArtifact::new(command)),
      StepSpec::SetVersion => Box::new(steps::SetVersion::new()),
      StepSpec::Upload { command, expect } => Box::new(steps::Upload::new(command, expect)),
      StepSpec::SetFutureVersion => Box::new(steps::SetFutureVersion::new()),
      StepSpec::EnsureBranch => Box::new(steps::EnsureBranch::new()),
      StepSpec::EnsureClean => Box::new(steps::EnsureClean::new()),
      StepSpec::CommitVersion {
        which,
        message,
        stop_on_failure,
      } => Box::new(steps::CommitVersion::new(which, message, stop_on_failure)),
      StepSpec::Tag => Box::new(steps::Tag::new()),
      StepSpec::Push => Box::new(steps::Push::new()),
      StepSpec::PushTags => Box::new(steps::PushTags::new()),
      StepSpec::CheckCi { url, expect } => Box::new(steps::CheckCi::new(url, expect)),
      StepSpec::Warn { message } => Box::new(steps::Warn::new(message)),
    }
  }

  /// Short label for `liftoff plan`
  pub fn label(&self) -> String {
    match self {
      StepSpec::Shell { command, .. } => format!("shell [{}]", command),
      StepSpec::ConfirmChangelog => "confirm-changelog".to_string(),
      StepSpec::CheckChangelog { .. } => "check-changelog".to_string(),
      StepSpec::ApproveArtifact { command } => format!("approve-artifact [{}]", command),
      StepSpec::SetVersion => "set-version".to_string(),
      StepSpec::Upload { command, .. } => format!("upload [{}]", command),
      StepSpec::SetFutureVersion => "set-future-version".to_string(),
      StepSpec::EnsureBranch => "ensure-branch".to_string(),
      StepSpec::EnsureClean => "ensure-clean".to_string(),
      StepSpec::CommitVersion { which, .. } => match which {
        VersionKind::Release => "commit-version".to_string(),
        VersionKind::Development => "commit-version (development)".to_string(),
      },
      StepSpec::Tag => "tag".to_string(),
      StepSpec::Push => "push".to_string(),
      StepSpec::PushTags => "push-tags".to_string(),
      StepSpec::CheckCi { url, .. } => format!("check-ci [{}]", url),
      StepSpec::Warn { .. } => "warn".to_string(),
    }
  }
}

/// The stock pipeline used when `[[steps]]` is absent: checks first, then
/// version bump, build, commit, tag, upload, and post-release bookkeeping.
pub fn default_pipeline() -> Vec<StepSpec> {
  vec![
    StepSpec::Shell {
      command: "cargo test".to_string(),
      stop_on_failure: true,
    },
    StepSpec::CheckChangelog { marker: None },
    StepSpec::EnsureClean,
    StepSpec::EnsureBranch,
    StepSpec::ConfirmChangelog,
    StepSpec::SetVersion,
    StepSpec::ApproveArtifact {
      command: "cargo package --list".to_string(),
    },
    StepSpec::CommitVersion {
      which: VersionKind::Release,
      message: None,
      stop_on_failure: true,
    },
    StepSpec::Tag,
    StepSpec::Upload {
      command: "cargo publish".to_string(),
      expect: None,
    },
    StepSpec::SetFutureVersion,
    StepSpec::CommitVersion {
      which: VersionKind::Development,
      message: None,
      stop_on_failure: true,
    },
    StepSpec::Push,
    StepSpec::PushTags,
    StepSpec::Warn {
      message: "Do not forget to publish the documentation now!".to_string(),
    },
  ]
}

impl LiftConfig {
  /// Find config file in search order: liftoff.toml, .liftoff.toml,
  /// .config/liftoff.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("liftoff.toml"),
      path.join(".liftoff.toml"),
      path.join(".config").join("liftoff.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from liftoff.toml (searches multiple locations)
  pub fn load(path: &Path) -> LiftResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      LiftError::Config(ConfigError::NotFound {
        project_root: path.to_path_buf(),
      })
    })?;

    let content = fs::read_to_string(&config_path)?;
    let config: LiftConfig = toml_edit::de::from_str(&content)
      .map_err(|e| LiftError::message(format!("Failed to parse {}: {}", config_path.display(), e)))?;

    if config.project.name.is_empty() {
      return Err(LiftError::Config(ConfigError::MissingField {
        field: "project.name".to_string(),
      }));
    }

    Ok(config)
  }

  /// Check if config exists at the given path
  pub fn exists(path: &Path) -> bool {
    Self::find_config_path(path).is_some()
  }

  /// The configured pipeline, or the stock one when `[[steps]]` is absent
  pub fn pipeline(&self) -> Vec<StepSpec> {
    if self.steps.is_empty() {
      default_pipeline()
    } else {
      self.steps.clone()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_minimal_config() {
    let config: LiftConfig = toml_edit::de::from_str(
      r#"
[project]
name = "demo"
"#,
    )
    .unwrap();
    assert_eq!(config.project.branch, "main");
    assert_eq!(config.project.version_file, PathBuf::from("Cargo.toml"));
    assert_eq!(config.project.version_keyword, "version");
    assert_eq!(config.log.verbosity, "info");
    assert!(config.steps.is_empty());
    assert!(!config.pipeline().is_empty());
  }

  #[test]
  fn test_parse_step_specs() {
    let config: LiftConfig = toml_edit::de::from_str(
      r#"
[project]
name = "demo"
branch = "release"

[[steps]]
kind = "shell"
command = "cargo test"

[[steps]]
kind = "commit-version"
which = "development"
message = "Back to development: {version}"

[[steps]]
kind = "upload"
command = "cargo publish"
expect = "Uploading"
"#,
    )
    .unwrap();

    assert_eq!(config.steps.len(), 3);
    assert!(matches!(
      &config.steps[0],
      StepSpec::Shell { command, stop_on_failure: true } if command == "cargo test"
    ));
    assert!(matches!(
      &config.steps[1],
      StepSpec::CommitVersion {
        which: VersionKind::Development,
        ..
      }
    ));
    assert!(matches!(
      &config.steps[2],
      StepSpec::Upload { expect: Some(e), .. } if e == "Uploading"
    ));
  }

  #[test]
  fn test_load_requires_project_name() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("liftoff.toml"), "[project]\nname = \"\"\n").unwrap();
    assert!(LiftConfig::load(dir.path()).is_err());
  }

  #[test]
  fn test_load_missing_config_has_help() {
    let dir = tempfile::tempdir().unwrap();
    let err = LiftConfig::load(dir.path()).unwrap_err();
    assert!(err.help_message().is_some());
  }

  #[test]
  fn test_default_pipeline_ends_with_push_steps() {
    let pipeline = default_pipeline();
    assert!(matches!(pipeline[0], StepSpec::Shell { .. }));
    let tail: Vec<String> = pipeline.iter().rev().take(3).map(|s| s.label()).collect();
    assert_eq!(tail, vec!["warn", "push-tags", "push"]);
  }
}
