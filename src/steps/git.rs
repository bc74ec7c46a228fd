//! Git steps: preflight guards, version commit, tag, push
//!
//! All operations go through system git via the shell, in the project
//! working directory. The commit and tag steps can be rolled back; pushing
//! the branch cannot, and its success deliberately erases all earlier
//! rollback history.

use crate::core::context::ReleaseContext;
use crate::core::config::VersionKind;
use crate::core::error::{LiftError, StepError, StepResult};
use crate::core::runner::CommandRunner;
use crate::core::step::{Capability, Outcome, Step};
use crate::steps::{execute_or_fail, expand};

/// Git state must be appropriate to start a release: not a detached head,
/// and no uncommitted changes in tracked files.
pub struct EnsureClean {
  outcome: Outcome,
}

impl EnsureClean {
  pub const EXIT_CODE: i32 = 52;

  pub fn new() -> Self {
    Self {
      outcome: Outcome::Pending,
    }
  }
}

impl Default for EnsureClean {
  fn default() -> Self {
    Self::new()
  }
}

impl Step for EnsureClean {
  fn name(&self) -> String {
    "ensure-clean".to_string()
  }

  fn exit_code(&self) -> i32 {
    Self::EXIT_CODE
  }

  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()> {
    let runner = CommandRunner::new(&ctx.workdir);

    // Prints something like refs/heads/main, or nothing on a detached head
    // (likely a tag checkout)
    let head = runner.run("git symbolic-ref --quiet HEAD", None)?;
    if !head.success() || head.text.is_empty() {
      self.outcome = Outcome::Failed;
      return Err(StepError::halt("Wait, are you on a detached head?"));
    }

    let changes = execute_or_fail(ctx, "git status --short --untracked-files=no", None, true, &mut self.outcome)?;
    if !changes.is_empty() {
      self.outcome = Outcome::Failed;
      return Err(StepError::halt("There are uncommitted changes in tracked files."));
    }
    self.outcome = Outcome::Succeeded;
    Ok(())
  }

  fn outcome(&self) -> Outcome {
    self.outcome
  }
}

/// The release must happen from the configured branch.
pub struct EnsureBranch {
  outcome: Outcome,
}

impl EnsureBranch {
  pub const EXIT_CODE: i32 = 51;

  pub fn new() -> Self {
    Self {
      outcome: Outcome::Pending,
    }
  }
}

impl Default for EnsureBranch {
  fn default() -> Self {
    Self::new()
  }
}

impl Step for EnsureBranch {
  fn name(&self) -> String {
    "ensure-branch".to_string()
  }

  fn exit_code(&self) -> i32 {
    Self::EXIT_CODE
  }

  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()> {
    let required = ctx.project.branch.clone();
    let branch = execute_or_fail(ctx, "git rev-parse --abbrev-ref HEAD", None, true, &mut self.outcome)?;
    // `HEAD` means a detached head, which never equals a branch name
    if branch != required {
      self.outcome = Outcome::Failed;
      return Err(StepError::halt(format!(
        "You are in branch \"{}\", but should be in branch \"{}\" in order to make a release.",
        branch, required
      )));
    }
    self.outcome = Outcome::Succeeded;
    Ok(())
  }

  fn outcome(&self) -> Outcome {
    self.outcome
  }
}

/// Create a git commit whose only alteration is the new version number.
pub struct CommitVersion {
  which: VersionKind,
  message: String,
  stop_on_failure: bool,
  outcome: Outcome,
}

impl CommitVersion {
  pub const EXIT_CODE: i32 = 53;

  pub fn new(which: VersionKind, message: Option<String>, stop_on_failure: bool) -> Self {
    let message = message.unwrap_or_else(|| match which {
      VersionKind::Release => "Version {version}".to_string(),
      VersionKind::Development => "Bump version to {version} after release".to_string(),
    });
    Self {
      which,
      // Escape quotes so the message survives the shell
      message: message.replace('"', "\\\""),
      stop_on_failure,
      outcome: Outcome::Pending,
    }
  }

  fn version(&self, ctx: &ReleaseContext) -> StepResult<String> {
    match self.which {
      VersionKind::Release => ctx
        .versions
        .new_version()
        .map(str::to_string)
        .ok_or_else(|| StepError::halt("No release version has been set; cannot commit it.")),
      VersionKind::Development => ctx.versions.future_version().map_err(|e| StepError::halt(e.to_string())),
    }
  }
}

impl Step for CommitVersion {
  fn name(&self) -> String {
    match self.which {
      VersionKind::Release => "commit-version".to_string(),
      VersionKind::Development => "commit-version (development)".to_string(),
    }
  }

  fn exit_code(&self) -> i32 {
    Self::EXIT_CODE
  }

  fn stop_on_failure(&self) -> bool {
    self.stop_on_failure
  }

  fn capability(&self) -> Capability {
    Capability::Rollback
  }

  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()> {
    // `{version}` resolves per the configured kind; the remaining
    // placeholders expand the usual way
    let message = self.message.replace("{version}", &self.version(ctx)?);
    let message = expand(&message, ctx)?;
    let command = format!("git commit -a -m \"{}\"", message);
    execute_or_fail(ctx, &command, None, self.stop_on_failure, &mut self.outcome)?;
    Ok(())
  }

  fn outcome(&self) -> Outcome {
    self.outcome
  }

  fn rollback(&mut self, ctx: &mut ReleaseContext) -> Result<(), LiftError> {
    let runner = CommandRunner::new(&ctx.workdir);
    let output = runner.run("git reset --hard HEAD^", None)?;
    if !output.success() {
      return Err(LiftError::message(format!("git reset failed: {}", output.text)));
    }
    Ok(())
  }
}

/// Tag the current commit with the new version number. Runs only after some
/// other step has recorded the release version; skips with a warning
/// otherwise. A tag failure should not stop the release by default.
pub struct Tag {
  outcome: Outcome,
}

impl Tag {
  pub const EXIT_CODE: i32 = 54;

  pub fn new() -> Self {
    Self {
      outcome: Outcome::Pending,
    }
  }
}

impl Default for Tag {
  fn default() -> Self {
    Self::new()
  }
}

impl Step for Tag {
  fn name(&self) -> String {
    "tag".to_string()
  }

  fn exit_code(&self) -> i32 {
    Self::EXIT_CODE
  }

  fn stop_on_failure(&self) -> bool {
    false
  }

  fn capability(&self) -> Capability {
    Capability::Rollback
  }

  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()> {
    let Some(version) = ctx.versions.new_version().map(str::to_string) else {
      log::warn!("Skipping the tag step. It can only run AFTER some other step sets the release version.");
      return Ok(());
    };
    let command = format!("git tag -a v{0} -m \"Version {0}\"", version);
    execute_or_fail(ctx, &command, None, false, &mut self.outcome)?;
    if self.outcome == Outcome::Succeeded {
      ctx.created_tags.push(version);
    }
    Ok(())
  }

  fn outcome(&self) -> Outcome {
    self.outcome
  }

  fn rollback(&mut self, ctx: &mut ReleaseContext) -> Result<(), LiftError> {
    let version = ctx
      .versions
      .new_version()
      .ok_or_else(|| LiftError::message("no release version to untag"))?;
    let runner = CommandRunner::new(&ctx.workdir);
    let output = runner.run(&format!("git tag -d \"v{}\"", version), None)?;
    if !output.success() {
      return Err(LiftError::message(format!("git tag -d failed: {}", output.text)));
    }
    Ok(())
  }
}

/// `git push`. This critical step has no rollback: once the remote has the
/// commits, undoing local steps would leave local and remote inconsistent.
pub struct Push {
  outcome: Outcome,
}

impl Push {
  pub const EXIT_CODE: i32 = 55;

  const WARNING: &'static str = "One should never try to undo a git push. Really.\n\
    This release process went far -- the push succeeded -- but\n\
    something else went wrong after the push. It will be easier\n\
    to finish the release process manually, so none of the steps\n\
    that preceded the push will be rolled back.";

  pub fn new() -> Self {
    Self {
      outcome: Outcome::Pending,
    }
  }
}

impl Default for Push {
  fn default() -> Self {
    Self::new()
  }
}

impl Step for Push {
  fn name(&self) -> String {
    "push".to_string()
  }

  fn exit_code(&self) -> i32 {
    Self::EXIT_CODE
  }

  // It should be easy to push again afterwards
  fn stop_on_failure(&self) -> bool {
    false
  }

  fn capability(&self) -> Capability {
    Capability::Irreversible {
      warning: Self::WARNING.to_string(),
    }
  }

  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()> {
    execute_or_fail(ctx, "git push", None, false, &mut self.outcome)?;
    Ok(())
  }

  fn outcome(&self) -> Outcome {
    self.outcome
  }
}

/// Push local tags to the remote repository. Can be rolled back by deleting
/// the tags created during this run from the remote.
pub struct PushTags {
  outcome: Outcome,
}

impl PushTags {
  pub const EXIT_CODE: i32 = 56;

  pub fn new() -> Self {
    Self {
      outcome: Outcome::Pending,
    }
  }
}

impl Default for PushTags {
  fn default() -> Self {
    Self::new()
  }
}

impl Step for PushTags {
  fn name(&self) -> String {
    "push-tags".to_string()
  }

  fn exit_code(&self) -> i32 {
    Self::EXIT_CODE
  }

  fn stop_on_failure(&self) -> bool {
    false
  }

  fn capability(&self) -> Capability {
    Capability::Rollback
  }

  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()> {
    execute_or_fail(ctx, "git push --tags", None, false, &mut self.outcome)?;
    Ok(())
  }

  fn outcome(&self) -> Outcome {
    self.outcome
  }

  fn rollback(&mut self, ctx: &mut ReleaseContext) -> Result<(), LiftError> {
    let runner = CommandRunner::new(&ctx.workdir);
    let mut failed = Vec::new();
    for tag in &ctx.created_tags {
      let command = format!("git push --delete origin \"v{}\"", tag);
      match runner.run(&command, None) {
        Ok(output) if output.success() => {}
        Ok(output) => {
          log::error!("Could not delete remote tag v{}: {}", tag, output.text);
          failed.push(tag.clone());
        }
        Err(e) => {
          log::error!("Could not delete remote tag v{}: {}", tag, e);
          failed.push(tag.clone());
        }
      }
    }
    if failed.is_empty() {
      Ok(())
    } else {
      Err(LiftError::message(format!(
        "failed to delete remote tags: {}",
        failed.join(", ")
      )))
    }
  }
}
