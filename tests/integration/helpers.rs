//! Test helpers for integration tests

use anyhow::{Context, Result};
use liftoff::core::config::ProjectConfig;
use liftoff::core::context::ReleaseContext;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A throwaway project under git with one committed release candidate
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestRepo {
  /// Create a repo on branch `main` holding a Cargo.toml at the given
  /// version and a changelog with a pending-release section.
  pub fn new(version: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(
      path.join("Cargo.toml"),
      format!(
        r#"[package]
name = "demo"
version = "{}"
edition = "2021"
"#,
        version
      ),
    )?;
    std::fs::write(
      path.join("CHANGELOG.md"),
      "# Changelog\n\n## Unreleased\n- the big feature\n",
    )?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial"])?;

    Ok(Self { _root: root, path })
  }

  /// A non-interactive release context rooted in this repo
  pub fn context(&self) -> ReleaseContext {
    let project = ProjectConfig {
      name: "demo".to_string(),
      ..Default::default()
    };
    ReleaseContext::new(project, &self.path).assume_yes(true)
  }

  /// Subject line of the current HEAD commit
  pub fn head_subject(&self) -> Result<String> {
    let output = git(&self.path, &["log", "-1", "--format=%s"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Does the given tag exist locally?
  pub fn has_tag(&self, tag: &str) -> Result<bool> {
    let output = git(&self.path, &["tag", "--list", tag])?;
    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
  }

  /// Read a file relative to the repo root
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  /// Write a file relative to the repo root (leaves it uncommitted)
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    std::fs::write(self.path.join(path), content)?;
    Ok(())
  }
}

/// Run a git command in a directory, failing loudly on a non-zero exit
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}
