//! Pipeline controller
//!
//! Executes the configured steps strictly in the order supplied at
//! construction. Tracks which succeeded steps can be undone and drives the
//! rollback sweep when a later step fails. Two failure paths exist:
//!
//! - a controlled halt (`StepError::Halt`) — logged, rolled back, surfaced
//!   with the failing step's own exit code;
//! - an unexpected defect — rolled back, then propagated unmodified.
//!
//! Once an irreversible step succeeds, every earlier rollback entry is
//! discarded: the irreversible external side effect already happened, and
//! silently undoing the local steps that preceded it would leave local and
//! remote state inconsistent. Conservative on purpose.

use crate::core::context::ReleaseContext;
use crate::core::error::{LiftError, StepError};
use crate::core::step::{Capability, Outcome, Step};
use crate::ui::{format, prompt};
use std::fmt;

/// Why a release run did not complete
#[derive(Debug)]
pub enum ReleaseFailure {
  /// A step requested a controlled stop
  Halted {
    step: String,
    exit_code: i32,
    reason: String,
    rewind: RewindReport,
  },

  /// A step failed unexpectedly; `source` is the original error
  Defect {
    step: String,
    source: LiftError,
    rewind: RewindReport,
  },
}

impl fmt::Display for ReleaseFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseFailure::Halted { step, reason, .. } => {
        write!(f, "release stopped at step {}: {}", step, reason)
      }
      ReleaseFailure::Defect { step, source, .. } => {
        write!(f, "unexpected failure in step {}: {}", step, source)
      }
    }
  }
}

/// What the rollback sweep did
#[derive(Debug, Default)]
pub struct RewindReport {
  /// Warnings from irreversible steps that already succeeded
  pub notices: Vec<String>,
  /// Names of the steps whose rollback was invoked, most recent first
  pub rolled_back: Vec<String>,
  /// Rollback failures, logged and never escalated
  pub failures: Vec<String>,
}

/// Manages the whole release process
pub struct Releaser {
  ctx: ReleaseContext,
  steps: Vec<Box<dyn Step>>,
}

impl Releaser {
  pub fn new(ctx: ReleaseContext, steps: Vec<Box<dyn Step>>) -> Self {
    Self { ctx, steps }
  }

  pub fn context(&self) -> &ReleaseContext {
    &self.ctx
  }

  /// Execute every step in order. Returns the context on success so callers
  /// can inspect the released version.
  pub fn release(mut self) -> Result<ReleaseContext, ReleaseFailure> {
    // Indices into self.steps: succeeded steps with a rollback capability,
    // in execution order (popped in reverse for undo)
    let mut rewindable: Vec<usize> = Vec::new();
    let mut notices: Vec<String> = Vec::new();

    for index in 0..self.steps.len() {
      let name = self.steps[index].name();
      log::info!("{}", format::header(&name, '='));

      let result = self.steps[index].execute(&mut self.ctx);
      match result {
        Err(StepError::Halt(reason)) => {
          log::error!("Release process stopped at step {}:\n{}", name, reason);
          let rewind = self.rewind(&rewindable, notices);
          return Err(ReleaseFailure::Halted {
            exit_code: self.steps[index].exit_code(),
            step: name,
            reason,
            rewind,
          });
        }
        Err(StepError::Defect(source)) => {
          log::debug!("Unexpected failure in step {}: {}", name, source);
          let rewind = self.rewind(&rewindable, notices);
          return Err(ReleaseFailure::Defect {
            step: name,
            source,
            rewind,
          });
        }
        Ok(()) => {
          if self.steps[index].outcome() == Outcome::Succeeded {
            match self.steps[index].capability() {
              Capability::Rollback => rewindable.push(index),
              Capability::Irreversible { warning } => {
                log::debug!("Step {} is irreversible; erasing rollback history.", name);
                rewindable.clear();
                notices.clear();
                notices.push(warning);
              }
              Capability::None => {}
            }
          }
          // A failed step with stop_on_failure = false already warned; the
          // pipeline just moves on and the step stays out of the rewindable
          // stack
        }
      }
    }

    log::info!(
      "Successfully released version {}.",
      self.ctx.versions.new_version().unwrap_or("(unchanged)")
    );
    Ok(self.ctx)
  }

  /// Undo the rewindable steps in strict LIFO order. Irreversible notices
  /// are displayed first so the operator knows an unrecoverable action
  /// already happened. Each rollback failure is caught and logged; the sweep
  /// always attempts every remaining step.
  fn rewind(&mut self, rewindable: &[usize], notices: Vec<String>) -> RewindReport {
    let mut report = RewindReport {
      notices,
      ..Default::default()
    };

    log::error!("{}", format::header("ROLLBACK", '*'));
    for notice in &report.notices {
      log::error!("{}", notice);
    }

    if rewindable.is_empty() {
      log::error!("No steps to roll back, but the release process FAILED.");
      return report;
    }

    let names: Vec<String> = rewindable.iter().rev().map(|&i| self.steps[i].name()).collect();
    println!("About to roll back the following steps:\n{}", names.join(", "));
    if !prompt::confirm("Continue?", true, self.ctx.assume_yes) {
      return report;
    }

    for &index in rewindable.iter().rev() {
      let name = self.steps[index].name();
      log::error!("{}", format::header(&format!("ROLLBACK {}", name), '*'));
      match self.steps[index].rollback(&mut self.ctx) {
        Ok(()) => report.rolled_back.push(name),
        Err(e) => {
          log::error!("Could not roll back step {}:\n{}", name, e);
          report.failures.push(name);
        }
      }
    }
    report
  }
}
