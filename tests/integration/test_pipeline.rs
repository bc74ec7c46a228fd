//! Whole-pipeline runs against real repositories

use crate::helpers::TestRepo;
use anyhow::Result;
use liftoff::core::config::{StepSpec, VersionKind};
use liftoff::core::releaser::{ReleaseFailure, Releaser};
use liftoff::core::step::Step;
use liftoff::core::version_file;

fn build(specs: Vec<StepSpec>) -> Vec<Box<dyn Step>> {
  specs.iter().map(|spec| spec.build()).collect()
}

#[test]
fn test_successful_release_run() -> Result<()> {
  let repo = TestRepo::new("0.1.0")?;
  let ctx = repo.context().preset_version(Some("0.2.0".to_string()));

  let steps = build(vec![
    StepSpec::CheckChangelog { marker: None },
    StepSpec::EnsureClean,
    StepSpec::EnsureBranch,
    StepSpec::SetVersion,
    StepSpec::CommitVersion {
      which: VersionKind::Release,
      message: None,
      stop_on_failure: true,
    },
    StepSpec::Tag,
    StepSpec::SetFutureVersion,
    StepSpec::CommitVersion {
      which: VersionKind::Development,
      message: None,
      stop_on_failure: true,
    },
  ]);

  let ctx = Releaser::new(ctx, steps).release().expect("release should succeed");

  assert_eq!(ctx.versions.old(), Some("0.1.0"));
  assert_eq!(ctx.versions.new_version(), Some("0.2.0"));
  assert!(repo.has_tag("v0.2.0")?);
  // The tree is ready for the next cycle
  assert_eq!(
    version_file::read_version(&repo.path.join("Cargo.toml"), "version").unwrap(),
    "0.2.1.dev1"
  );
  assert_eq!(repo.head_subject()?, "Bump version to 0.2.1.dev1 after release");
  Ok(())
}

#[test]
fn test_halt_rolls_back_commit_and_tag() -> Result<()> {
  let repo = TestRepo::new("0.1.0")?;
  let ctx = repo.context().preset_version(Some("0.2.0".to_string()));

  let steps = build(vec![
    StepSpec::SetVersion,
    StepSpec::CommitVersion {
      which: VersionKind::Release,
      message: None,
      stop_on_failure: true,
    },
    StepSpec::Tag,
    StepSpec::Shell {
      command: "false".to_string(),
      stop_on_failure: true,
    },
  ]);

  let result = Releaser::new(ctx, steps).release();
  match result {
    Err(ReleaseFailure::Halted { exit_code, rewind, .. }) => {
      assert_eq!(exit_code, 2);
      assert_eq!(rewind.rolled_back, vec!["tag", "commit-version"]);
      assert!(rewind.failures.is_empty());
    }
    other => panic!("expected halt, got {:?}", other.map(|_| ())),
  }

  // The repo is back where it started
  assert_eq!(repo.head_subject()?, "Initial");
  assert!(!repo.has_tag("v0.2.0")?);
  assert_eq!(
    version_file::read_version(&repo.path.join("Cargo.toml"), "version").unwrap(),
    "0.1.0"
  );
  Ok(())
}

#[test]
fn test_successful_shell_step_erases_rollback_history() -> Result<()> {
  let repo = TestRepo::new("0.1.0")?;
  let ctx = repo.context().preset_version(Some("0.2.0".to_string()));

  let steps = build(vec![
    StepSpec::SetVersion,
    StepSpec::CommitVersion {
      which: VersionKind::Release,
      message: None,
      stop_on_failure: true,
    },
    // An arbitrary command cannot be undone, so its success makes the
    // preceding commit final
    StepSpec::Shell {
      command: "true".to_string(),
      stop_on_failure: true,
    },
    StepSpec::Shell {
      command: "false".to_string(),
      stop_on_failure: true,
    },
  ]);

  let result = Releaser::new(ctx, steps).release();
  match result {
    Err(ReleaseFailure::Halted { rewind, .. }) => {
      assert!(rewind.rolled_back.is_empty());
      assert_eq!(rewind.notices.len(), 1);
    }
    other => panic!("expected halt, got {:?}", other.map(|_| ())),
  }

  // The version commit survived
  assert_eq!(repo.head_subject()?, "Version 0.2.0");
  Ok(())
}

#[test]
fn test_halt_carries_the_failing_steps_exit_code() -> Result<()> {
  let repo = TestRepo::new("0.2.0")?;
  // Preset version lower than the current one: set-version must halt
  let ctx = repo.context().preset_version(Some("0.1.0".to_string()));

  let steps = build(vec![StepSpec::SetVersion]);
  match Releaser::new(ctx, steps).release() {
    Err(ReleaseFailure::Halted { exit_code, step, .. }) => {
      assert_eq!(exit_code, 6);
      assert_eq!(step, "set-version");
    }
    other => panic!("expected halt, got {:?}", other.map(|_| ())),
  }
  Ok(())
}

#[test]
fn test_soft_failure_does_not_stop_the_pipeline() -> Result<()> {
  let repo = TestRepo::new("0.1.0")?;
  let ctx = repo.context().preset_version(Some("0.2.0".to_string()));

  let steps = build(vec![
    StepSpec::Shell {
      command: "false".to_string(),
      stop_on_failure: false,
    },
    StepSpec::SetVersion,
  ]);

  let ctx = Releaser::new(ctx, steps).release().expect("release should succeed");
  assert_eq!(ctx.versions.new_version(), Some("0.2.0"));
  Ok(())
}
