//! Git step behaviour against real repositories

use crate::helpers::{TestRepo, git};
use anyhow::Result;
use liftoff::core::config::VersionKind;
use liftoff::core::error::StepError;
use liftoff::core::step::{Outcome, Step};
use liftoff::steps::{CommitVersion, EnsureBranch, EnsureClean, Tag};

#[test]
fn test_ensure_clean_passes_on_clean_repo() -> Result<()> {
  let repo = TestRepo::new("0.1.0")?;
  let mut ctx = repo.context();

  let mut step = EnsureClean::new();
  step.execute(&mut ctx).unwrap();
  assert_eq!(step.outcome(), Outcome::Succeeded);
  Ok(())
}

#[test]
fn test_ensure_clean_halts_on_tracked_changes() -> Result<()> {
  let repo = TestRepo::new("0.1.0")?;
  repo.write_file("CHANGELOG.md", "# Changelog\n\n## Unreleased\n- edited\n")?;
  let mut ctx = repo.context();

  let mut step = EnsureClean::new();
  let result = step.execute(&mut ctx);
  assert!(matches!(result, Err(StepError::Halt(_))));
  assert_eq!(step.outcome(), Outcome::Failed);
  Ok(())
}

#[test]
fn test_ensure_clean_ignores_untracked_files() -> Result<()> {
  let repo = TestRepo::new("0.1.0")?;
  repo.write_file("scratch.txt", "not under version control\n")?;
  let mut ctx = repo.context();

  let mut step = EnsureClean::new();
  step.execute(&mut ctx).unwrap();
  assert_eq!(step.outcome(), Outcome::Succeeded);
  Ok(())
}

#[test]
fn test_ensure_clean_halts_on_detached_head() -> Result<()> {
  let repo = TestRepo::new("0.1.0")?;
  git(&repo.path, &["checkout", "--detach", "HEAD"])?;
  let mut ctx = repo.context();

  let mut step = EnsureClean::new();
  let result = step.execute(&mut ctx);
  assert!(matches!(result, Err(StepError::Halt(_))));
  Ok(())
}

#[test]
fn test_ensure_branch_checks_configured_branch() -> Result<()> {
  let repo = TestRepo::new("0.1.0")?;
  let mut ctx = repo.context();

  let mut step = EnsureBranch::new();
  step.execute(&mut ctx).unwrap();
  assert_eq!(step.outcome(), Outcome::Succeeded);

  git(&repo.path, &["checkout", "-b", "feature"])?;
  let mut step = EnsureBranch::new();
  let result = step.execute(&mut ctx);
  assert!(matches!(result, Err(StepError::Halt(_))));
  Ok(())
}

#[test]
fn test_commit_version_and_rollback() -> Result<()> {
  let repo = TestRepo::new("0.1.0")?;
  let mut ctx = repo.context();
  ctx.versions.set_new("0.2.0").unwrap();
  repo.write_file("CHANGELOG.md", "# Changelog\n\n## 0.2.0\n- the big feature\n")?;

  let mut step = CommitVersion::new(VersionKind::Release, None, true);
  step.execute(&mut ctx).unwrap();
  assert_eq!(step.outcome(), Outcome::Succeeded);
  assert_eq!(repo.head_subject()?, "Version 0.2.0");

  step.rollback(&mut ctx).unwrap();
  assert_eq!(repo.head_subject()?, "Initial");
  // The hard reset restores the committed file content too
  assert!(repo.read_file("CHANGELOG.md")?.contains("Unreleased"));
  Ok(())
}

#[test]
fn test_commit_version_custom_message() -> Result<()> {
  let repo = TestRepo::new("0.1.0")?;
  let mut ctx = repo.context();
  ctx.versions.set_new("0.2.0").unwrap();
  repo.write_file("CHANGELOG.md", "changed\n")?;

  let mut step = CommitVersion::new(VersionKind::Release, Some("Release {version} of {name}".to_string()), true);
  step.execute(&mut ctx).unwrap();
  assert_eq!(repo.head_subject()?, "Release 0.2.0 of demo");
  Ok(())
}

#[test]
fn test_tag_records_and_rolls_back() -> Result<()> {
  let repo = TestRepo::new("0.1.0")?;
  let mut ctx = repo.context();
  ctx.versions.set_new("0.2.0").unwrap();

  let mut step = Tag::new();
  step.execute(&mut ctx).unwrap();
  assert_eq!(step.outcome(), Outcome::Succeeded);
  assert!(repo.has_tag("v0.2.0")?);
  assert_eq!(ctx.created_tags, vec!["0.2.0"]);

  step.rollback(&mut ctx).unwrap();
  assert!(!repo.has_tag("v0.2.0")?);
  Ok(())
}

#[test]
fn test_tag_skips_without_release_version() -> Result<()> {
  let repo = TestRepo::new("0.1.0")?;
  let mut ctx = repo.context();

  let mut step = Tag::new();
  step.execute(&mut ctx).unwrap();
  // Skipped, not failed
  assert_eq!(step.outcome(), Outcome::Pending);
  assert!(ctx.created_tags.is_empty());
  Ok(())
}
