//! Step contract for the release pipeline
//!
//! A step is one unit of work in the release procedure. Its capabilities
//! (can it be rolled back? is it irreversible once done?) are declared as an
//! explicit tag resolved at construction, not discovered at runtime. Each
//! built-in step type owns a distinct non-zero exit code so external tooling
//! can distinguish failure causes on a controlled stop.

use crate::core::context::ReleaseContext;
use crate::core::error::{LiftError, StepResult};

/// Outcome of a step's primary action, set once after execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
  /// Not executed yet, or skipped
  #[default]
  Pending,
  /// The primary action completed
  Succeeded,
  /// The primary action failed (the pipeline may still have continued when
  /// `stop_on_failure` was false; failure never masquerades as success)
  Failed,
}

/// Undo capability of a step, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
  /// Success leaves nothing to undo
  None,
  /// Success can be undone via [`Step::rollback`]
  Rollback,
  /// Success can never be undone; the warning is shown to the operator and
  /// every earlier rollback entry is discarded once this step succeeds
  Irreversible { warning: String },
}

/// One unit of work in the release pipeline.
///
/// `execute` is invoked exactly once per run. A controlled stop is signalled
/// with `StepError::Halt`; any other error is treated as a defect. After a
/// non-error return, [`Step::outcome`] must report `Succeeded` or `Failed`
/// (or `Pending` when the step skipped itself).
pub trait Step {
  /// Human-readable identity, used for logging and rollback prompts
  fn name(&self) -> String;

  /// Process exit code used when this step halts the release
  fn exit_code(&self) -> i32 {
    1
  }

  /// Does a failure here abort the pipeline, or merely warn and continue?
  fn stop_on_failure(&self) -> bool {
    true
  }

  /// Declared undo capability
  fn capability(&self) -> Capability {
    Capability::None
  }

  /// The step's primary action
  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()>;

  /// Self-reported outcome of the primary action
  fn outcome(&self) -> Outcome;

  /// Best-effort inverse of `execute`. Invoked at most once, only if the
  /// step succeeded and the pipeline was later aborted. Failures are logged
  /// by the controller and never stop the rollback sweep.
  fn rollback(&mut self, _ctx: &mut ReleaseContext) -> Result<(), LiftError> {
    Ok(())
  }
}
