//! Arbitrary shell command step

use crate::core::context::ReleaseContext;
use crate::core::error::StepResult;
use crate::core::step::{Capability, Outcome, Step};
use crate::steps::{execute_or_fail, expand};

/// Run a configured shell command. Succeeds on exit code zero. An arbitrary
/// command cannot be undone, so a success makes everything before it
/// non-rewindable.
pub struct Shell {
  command: String,
  stop_on_failure: bool,
  outcome: Outcome,
}

impl Shell {
  pub const EXIT_CODE: i32 = 2;

  pub fn new(command: impl Into<String>, stop_on_failure: bool) -> Self {
    Self {
      command: command.into(),
      stop_on_failure,
      outcome: Outcome::Pending,
    }
  }
}

impl Step for Shell {
  fn name(&self) -> String {
    format!("[{}]", self.command)
  }

  fn exit_code(&self) -> i32 {
    Self::EXIT_CODE
  }

  fn stop_on_failure(&self) -> bool {
    self.stop_on_failure
  }

  fn capability(&self) -> Capability {
    Capability::Irreversible {
      warning: format!("Unable to roll back the step {}", self.name()),
    }
  }

  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()> {
    let command = expand(&self.command, ctx)?;
    execute_or_fail(ctx, &command, None, self.stop_on_failure, &mut self.outcome)?;
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
  use crate::core::error::StepError;

  fn ctx() -> ReleaseContext {
    ReleaseContext::new(ProjectConfig::default(), std::env::temp_dir())
  }

  #[test]
  #[cfg(unix)]
  fn test_shell_success() {
    let mut step = Shell::new("true", true);
    step.execute(&mut ctx()).unwrap();
    assert_eq!(step.outcome(), Outcome::Succeeded);
  }

  #[test]
  #[cfg(unix)]
  fn test_shell_failure_halts() {
    let mut step = Shell::new("false", true);
    let result = step.execute(&mut ctx());
    assert!(matches!(result, Err(StepError::Halt(_))));
    assert_eq!(step.outcome(), Outcome::Failed);
  }

  #[test]
  #[cfg(unix)]
  fn test_shell_failure_continues_when_not_stopping() {
    let mut step = Shell::new("false", false);
    step.execute(&mut ctx()).unwrap();
    assert_eq!(step.outcome(), Outcome::Failed);
  }

  #[test]
  fn test_shell_is_irreversible() {
    let step = Shell::new("true", true);
    assert!(matches!(step.capability(), Capability::Irreversible { .. }));
  }
}
