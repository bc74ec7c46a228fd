//! Version mutation steps
//!
//! `SetVersion` records the old version, obtains the new one (preset or
//! prompted), validates it through the version state machine, and writes it
//! into the versioned file. `SetFutureVersion` later writes the derived
//! development version so the tree is ready for the next cycle.

use crate::core::context::ReleaseContext;
use crate::core::error::{StepError, StepResult};
use crate::core::step::{Outcome, Step};
use crate::core::version_file;
use crate::ui::prompt;

/// Ask for the new version number and write it into the versioned file.
pub struct SetVersion {
  outcome: Outcome,
}

impl SetVersion {
  pub const EXIT_CODE: i32 = 6;

  pub fn new() -> Self {
    Self {
      outcome: Outcome::Pending,
    }
  }
}

impl Default for SetVersion {
  fn default() -> Self {
    Self::new()
  }
}

impl Step for SetVersion {
  fn name(&self) -> String {
    "set-version".to_string()
  }

  fn exit_code(&self) -> i32 {
    Self::EXIT_CODE
  }

  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()> {
    let path = ctx.version_file();
    let keyword = ctx.project.version_keyword.clone();

    let old = version_file::read_version(&path, &keyword).map_err(|e| StepError::halt(e.to_string()))?;
    println!("Current version: {}", old);
    ctx.versions.set_old(old);

    let answer = match ctx.preset_version.take() {
      Some(version) => version,
      None => {
        if ctx.assume_yes {
          self.outcome = Outcome::Failed;
          return Err(StepError::halt(
            "Running without a terminal; pass --set-version to choose the release version.",
          ));
        }
        prompt::input("What is the new version number?").ok_or_else(|| StepError::halt("No version number given."))?
      }
    };

    ctx.versions.set_new(&answer).map_err(|e| {
      self.outcome = Outcome::Failed;
      StepError::halt(e.to_string())
    })?;

    // The setter validated and trimmed; write what it recorded
    let version = ctx.versions.new_version().expect("new version was just set").to_string();
    version_file::write_version(&path, &keyword, &version)?;
    self.outcome = Outcome::Succeeded;
    Ok(())
  }

  fn outcome(&self) -> Outcome {
    self.outcome
  }
}

/// Write the next development version into the versioned file after the
/// release, e.g. `2.0.1` → `2.0.2.dev1`.
pub struct SetFutureVersion {
  outcome: Outcome,
}

impl SetFutureVersion {
  pub const EXIT_CODE: i32 = 9;

  pub fn new() -> Self {
    Self {
      outcome: Outcome::Pending,
    }
  }
}

impl Default for SetFutureVersion {
  fn default() -> Self {
    Self::new()
  }
}

impl Step for SetFutureVersion {
  fn name(&self) -> String {
    "set-future-version".to_string()
  }

  fn exit_code(&self) -> i32 {
    Self::EXIT_CODE
  }

  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()> {
    let path = ctx.version_file();
    let keyword = ctx.project.version_keyword.clone();

    // When set-version was left out of the pipeline (debugging), the file
    // already carries the release version; adopt it so the derivation works
    if ctx.versions.new_version().is_none() {
      let current = version_file::read_version(&path, &keyword).map_err(|e| StepError::halt(e.to_string()))?;
      ctx.versions.adopt_new(current);
    }

    let future = ctx.versions.future_version().map_err(|e| StepError::halt(e.to_string()))?;
    log::info!("Ready for the next development cycle! Setting version {}", future);
    version_file::write_version(&path, &keyword, &future)?;
    self.outcome = Outcome::Succeeded;
    Ok(())
  }

  fn outcome(&self) -> Outcome {
    self.outcome
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::config::ProjectConfig;
  use std::fs;

  fn setup(version: &str) -> (tempfile::TempDir, ReleaseContext) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
      dir.path().join("Cargo.toml"),
      format!("[package]\nname = \"demo\"\nversion = \"{}\"\n", version),
    )
    .unwrap();
    let project = ProjectConfig {
      name: "demo".to_string(),
      ..Default::default()
    };
    let ctx = ReleaseContext::new(project, dir.path()).assume_yes(true);
    (dir, ctx)
  }

  #[test]
  fn test_set_version_with_preset() {
    let (_dir, ctx) = setup("0.1.0");
    let mut ctx = ctx.preset_version(Some("0.2.0".to_string()));
    let mut step = SetVersion::new();
    step.execute(&mut ctx).unwrap();

    assert_eq!(step.outcome(), Outcome::Succeeded);
    assert_eq!(ctx.versions.old(), Some("0.1.0"));
    assert_eq!(ctx.versions.new_version(), Some("0.2.0"));
    assert_eq!(version_file::read_version(&ctx.version_file(), "version").unwrap(), "0.2.0");
  }

  #[test]
  fn test_set_version_rejects_decrease() {
    let (_dir, ctx) = setup("0.2.0");
    let mut ctx = ctx.preset_version(Some("0.1.0".to_string()));
    let mut step = SetVersion::new();
    let result = step.execute(&mut ctx);

    assert!(matches!(result, Err(StepError::Halt(_))));
    assert_eq!(step.outcome(), Outcome::Failed);
    // The file is untouched on a rejected version
    assert_eq!(version_file::read_version(&ctx.version_file(), "version").unwrap(), "0.2.0");
  }

  #[test]
  fn test_set_version_non_interactive_needs_preset() {
    let (_dir, mut ctx) = setup("0.1.0");
    let mut step = SetVersion::new();
    assert!(matches!(step.execute(&mut ctx), Err(StepError::Halt(_))));
  }

  #[test]
  fn test_set_future_version_after_release() {
    let (_dir, ctx) = setup("0.1.0");
    let mut ctx = ctx.preset_version(Some("0.2.0".to_string()));
    SetVersion::new().execute(&mut ctx).unwrap();

    let mut step = SetFutureVersion::new();
    step.execute(&mut ctx).unwrap();
    assert_eq!(step.outcome(), Outcome::Succeeded);
    assert_eq!(
      version_file::read_version(&ctx.version_file(), "version").unwrap(),
      "0.2.1.dev1"
    );
  }

  #[test]
  fn test_set_future_version_adopts_file_version() {
    // set-version was skipped; the file already holds the released version
    let (_dir, mut ctx) = setup("1.4.0");
    let mut step = SetFutureVersion::new();
    step.execute(&mut ctx).unwrap();
    assert_eq!(
      version_file::read_version(&ctx.version_file(), "version").unwrap(),
      "1.4.1.dev1"
    );
  }
}
