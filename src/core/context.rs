//! Shared release context
//!
//! One explicit value per run, passed by mutable reference into every step's
//! entry point. No ambient or global state; the lifecycle is scoped exactly
//! to one pipeline run.

use crate::core::config::ProjectConfig;
use crate::core::version::VersionState;
use std::path::{Path, PathBuf};

/// Shared, mutable state of one release run
#[derive(Debug)]
pub struct ReleaseContext {
  /// Read-only release parameters supplied by the caller
  pub project: ProjectConfig,

  /// Project root; all commands and file paths resolve against this
  pub workdir: PathBuf,

  /// The old/new/future version state machine
  pub versions: VersionState,

  /// Tags created during this run, appended by tag-creation steps and
  /// consumed during rollback of tag-push steps
  pub created_tags: Vec<String>,

  /// Answer every prompt with its default (non-interactive mode)
  pub assume_yes: bool,

  /// Release version supplied up front so `set-version` does not prompt
  pub preset_version: Option<String>,
}

impl ReleaseContext {
  pub fn new(project: ProjectConfig, workdir: impl Into<PathBuf>) -> Self {
    Self {
      project,
      workdir: workdir.into(),
      versions: VersionState::new(),
      created_tags: Vec::new(),
      assume_yes: false,
      preset_version: None,
    }
  }

  pub fn assume_yes(mut self, yes: bool) -> Self {
    self.assume_yes = yes;
    self
  }

  pub fn preset_version(mut self, version: Option<String>) -> Self {
    self.preset_version = version;
    self
  }

  /// Absolute path of the versioned file
  pub fn version_file(&self) -> PathBuf {
    self.resolve(&self.project.version_file)
  }

  /// Absolute path of the changelog file
  pub fn changelog(&self) -> PathBuf {
    self.resolve(&self.project.changelog)
  }

  fn resolve(&self, path: &Path) -> PathBuf {
    if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.workdir.join(path)
    }
  }
}
