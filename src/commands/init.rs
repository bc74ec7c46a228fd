//! `liftoff init`: write a commented starter configuration

use crate::core::config::LiftConfig;
use crate::core::error::{LiftError, LiftResult};
use std::fs;
use std::path::Path;

const SAMPLE_CONFIG: &str = r#"# liftoff configuration
# https://crates.io/crates/liftoff

[project]
# Package name, available as {name} in command templates.
name = "CHANGE-ME"

# Only release new versions from this git branch.
branch = "main"

# File carrying the quoted version assignment, and the key to look for.
# The first line matching `version = "..."` is rewritten in place.
version_file = "Cargo.toml"
version_keyword = "version"

# Changelog checked before releasing.
changelog = "CHANGELOG.md"

[log]
# Everything is recorded here at debug level, one file per run.
file = "release.log"
# Screen verbosity: debug | info | warn | error.
verbosity = "info"

# The pipeline. Remove this section to get the stock pipeline
# (`liftoff plan` shows it). Steps run strictly in the order below.
#
# [[steps]]
# kind = "shell"
# command = "cargo test"
#
# [[steps]]
# kind = "check-changelog"
#
# [[steps]]
# kind = "ensure-clean"
#
# [[steps]]
# kind = "ensure-branch"
#
# [[steps]]
# kind = "set-version"
#
# [[steps]]
# kind = "approve-artifact"
# command = "cargo package --list"
#
# [[steps]]
# kind = "commit-version"
#
# [[steps]]
# kind = "tag"
#
# [[steps]]
# kind = "upload"
# command = "cargo publish"
#
# [[steps]]
# kind = "set-future-version"
#
# [[steps]]
# kind = "commit-version"
# which = "development"
#
# [[steps]]
# kind = "push"
#
# [[steps]]
# kind = "push-tags"
"#;

/// Write liftoff.toml into the current directory, refusing to overwrite an
/// existing configuration.
pub fn run_init(workdir: &Path) -> LiftResult<()> {
  if let Some(existing) = LiftConfig::find_config_path(workdir) {
    return Err(LiftError::with_help(
      format!("Configuration already exists: {}", existing.display()),
      "Edit the existing file, or delete it first to start over.",
    ));
  }

  let path = workdir.join("liftoff.toml");
  fs::write(&path, SAMPLE_CONFIG)?;
  println!("Wrote {}", path.display());
  println!("Edit project.name, then check the pipeline with: liftoff plan");
  Ok(())
}
