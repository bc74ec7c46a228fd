//! Built-in release steps
//!
//! Each step is an independently trivial leaf operation composed by the
//! pipeline controller:
//!
//! - **shell**: arbitrary commands (tests, builds)
//! - **checks**: changelog hygiene, CI status, warnings
//! - **version**: read/prompt/write the release and future versions
//! - **artifact**: build approval and uploads
//! - **git**: branch/cleanliness guards, commit, tag, push
//!
//! Steps that shell out compose a [`CommandRunner`] rather than inheriting
//! execution behaviour.

mod artifact;
mod checks;
mod git;
mod shell;
mod version;

pub use artifact::{ApproveArtifact, Upload};
pub use checks::{CheckChangelog, CheckCi, ConfirmChangelog, Warn};
pub use git::{CommitVersion, EnsureBranch, EnsureClean, Push, PushTags, Tag};
pub use shell::Shell;
pub use version::{SetFutureVersion, SetVersion};

use crate::core::context::ReleaseContext;
use crate::core::error::{StepError, StepResult};
use crate::core::runner::CommandRunner;
use crate::core::step::Outcome;

/// Expand `{name}`, `{version}` and `{branch}` placeholders in a command or
/// message template. Halts when `{version}` is requested before any release
/// version was recorded.
pub(crate) fn expand(template: &str, ctx: &ReleaseContext) -> StepResult<String> {
  let mut text = template.replace("{name}", &ctx.project.name).replace("{branch}", &ctx.project.branch);
  if text.contains("{version}") {
    let version = ctx
      .versions
      .new_version()
      .ok_or_else(|| StepError::halt("No release version has been set yet; move the set-version step earlier."))?;
    text = text.replace("{version}", version);
  }
  Ok(text)
}

/// Run a command and classify the result, the way every command-backed step
/// does: exit code zero plus an accepting validator mean success. On failure
/// the step either halts the release or logs and continues, per its
/// `stop_on_failure` policy. The outcome is recorded either way.
pub(crate) fn execute_or_fail(
  ctx: &ReleaseContext,
  command: &str,
  validate: Option<&dyn Fn(&str) -> bool>,
  stop_on_failure: bool,
  outcome: &mut Outcome,
) -> StepResult<String> {
  let runner = CommandRunner::new(&ctx.workdir);
  let output = runner.run(command, None)?;

  let accepted = output.success() && validate.map_or(true, |v| v(&output.text));
  if accepted {
    *outcome = Outcome::Succeeded;
    return Ok(output.text);
  }

  *outcome = Outcome::Failed;
  let msg = format!("Command failed with code {}: {}", output.code, command);
  if stop_on_failure {
    Err(StepError::halt(msg))
  } else {
    log::warn!("{}\nContinuing anyway.", msg);
    Ok(output.text)
  }
}
