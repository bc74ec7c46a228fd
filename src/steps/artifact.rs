//! Artifact build approval and upload steps

use crate::core::context::ReleaseContext;
use crate::core::error::{StepError, StepResult};
use crate::core::step::{Capability, Outcome, Step};
use crate::steps::{execute_or_fail, expand};
use crate::ui::prompt;

/// Build the release artifact and let the operator verify its contents
/// before anything irreversible happens.
pub struct ApproveArtifact {
  command: String,
  outcome: Outcome,
}

impl ApproveArtifact {
  pub const EXIT_CODE: i32 = 5;

  pub fn new(command: impl Into<String>) -> Self {
    Self {
      command: command.into(),
      outcome: Outcome::Pending,
    }
  }
}

impl Step for ApproveArtifact {
  fn name(&self) -> String {
    "approve-artifact".to_string()
  }

  fn exit_code(&self) -> i32 {
    Self::EXIT_CODE
  }

  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()> {
    let command = expand(&self.command, ctx)?;
    let output = execute_or_fail(ctx, &command, None, true, &mut self.outcome)?;
    println!("{}", output);
    println!("The artifact has been generated; check that all expected files are in there.");

    if !prompt::confirm("Do you approve the artifact contents?", true, ctx.assume_yes) {
      self.outcome = Outcome::Failed;
      return Err(StepError::halt(
        "Artifact contents not approved.\nIf files are missing, check the package manifest settings.",
      ));
    }
    Ok(())
  }

  fn outcome(&self) -> Outcome {
    self.outcome
  }
}

/// Upload the artifact to a package index. The process exit code alone does
/// not reliably indicate success for some indexes, so an optional expected
/// output substring is also checked. An upload can never be undone.
pub struct Upload {
  command: String,
  expect: Option<String>,
  outcome: Outcome,
}

impl Upload {
  pub const EXIT_CODE: i32 = 8;

  pub fn new(command: impl Into<String>, expect: Option<String>) -> Self {
    Self {
      command: command.into(),
      expect,
      outcome: Outcome::Pending,
    }
  }
}

impl Step for Upload {
  fn name(&self) -> String {
    format!("upload [{}]", self.command)
  }

  fn exit_code(&self) -> i32 {
    Self::EXIT_CODE
  }

  fn capability(&self) -> Capability {
    Capability::Irreversible {
      warning: "Cannot roll back an upload to the package index.".to_string(),
    }
  }

  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()> {
    let command = expand(&self.command, ctx)?;
    let expect = self.expect.clone();
    let validate = move |text: &str| expect.as_ref().is_none_or(|e| text.contains(e.as_str()));
    execute_or_fail(ctx, &command, Some(&validate), true, &mut self.outcome)?;
    Ok(())
  }

  fn outcome(&self) -> Outcome {
    self.outcome
  }
}
