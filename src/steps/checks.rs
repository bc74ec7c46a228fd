//! Pre-release checks: changelog hygiene, CI status, plain warnings

use crate::core::context::ReleaseContext;
use crate::core::error::{StepError, StepResult};
use crate::core::step::{Outcome, Step};
use crate::steps::expand;
use crate::ui::prompt;
use std::fs;

/// Interactive guard: bug the operator about the changelog before anything
/// else happens.
pub struct ConfirmChangelog {
  outcome: Outcome,
}

impl ConfirmChangelog {
  pub const EXIT_CODE: i32 = 3;

  pub fn new() -> Self {
    Self {
      outcome: Outcome::Pending,
    }
  }
}

impl Default for ConfirmChangelog {
  fn default() -> Self {
    Self::new()
  }
}

impl Step for ConfirmChangelog {
  fn name(&self) -> String {
    "confirm-changelog".to_string()
  }

  fn exit_code(&self) -> i32 {
    Self::EXIT_CODE
  }

  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()> {
    let question = format!("Did you remember to update {}?", ctx.project.changelog.display());
    if prompt::confirm(&question, true, ctx.assume_yes) {
      log::debug!("Operator says the changelog is up to date.");
      self.outcome = Outcome::Succeeded;
      Ok(())
    } else {
      self.outcome = Outcome::Failed;
      Err(StepError::halt("One more undocumented release was avoided."))
    }
  }

  fn outcome(&self) -> Outcome {
    self.outcome
  }
}

/// Non-interactive changelog check: the file must exist and still carry the
/// pending-release marker (default `Unreleased`), proof that an entry for
/// this release was started.
pub struct CheckChangelog {
  marker: String,
  outcome: Outcome,
}

impl CheckChangelog {
  pub const EXIT_CODE: i32 = 4;
  const DEFAULT_MARKER: &'static str = "Unreleased";

  pub fn new(marker: Option<String>) -> Self {
    Self {
      marker: marker.unwrap_or_else(|| Self::DEFAULT_MARKER.to_string()),
      outcome: Outcome::Pending,
    }
  }
}

impl Step for CheckChangelog {
  fn name(&self) -> String {
    "check-changelog".to_string()
  }

  fn exit_code(&self) -> i32 {
    Self::EXIT_CODE
  }

  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()> {
    let path = ctx.changelog();
    log::info!("Checking {}", path.display());

    let text = match fs::read_to_string(&path) {
      Ok(text) => text,
      Err(_) => {
        self.outcome = Outcome::Failed;
        return Err(StepError::halt(format!("The changelog {} does not exist.", path.display())));
      }
    };

    let marker = self.marker.to_lowercase();
    if !text.to_lowercase().contains(&marker) {
      self.outcome = Outcome::Failed;
      return Err(StepError::halt(format!(
        "{} has no \"{}\" section; document this release first.",
        path.display(),
        self.marker
      )));
    }

    self.outcome = Outcome::Succeeded;
    Ok(())
  }

  fn outcome(&self) -> Outcome {
    self.outcome
  }
}

/// Query a CI status endpoint over HTTP. The request must succeed, return a
/// success status, and (when configured) the body must contain the expected
/// substring. Network failures are defects; a red or unknown build is a
/// controlled stop.
pub struct CheckCi {
  url: String,
  expect: Option<String>,
  outcome: Outcome,
}

impl CheckCi {
  pub const EXIT_CODE: i32 = 91;

  pub fn new(url: impl Into<String>, expect: Option<String>) -> Self {
    Self {
      url: url.into(),
      expect,
      outcome: Outcome::Pending,
    }
  }
}

impl Step for CheckCi {
  fn name(&self) -> String {
    "check-ci".to_string()
  }

  fn exit_code(&self) -> i32 {
    Self::EXIT_CODE
  }

  fn execute(&mut self, ctx: &mut ReleaseContext) -> StepResult<()> {
    let url = expand(&self.url, ctx)?;
    log::debug!("Querying CI status: {}", url);

    let response = reqwest::blocking::get(&url).map_err(crate::core::error::LiftError::from)?;
    let status = response.status();
    if !status.is_success() {
      self.outcome = Outcome::Failed;
      return Err(StepError::halt(format!("CI status endpoint returned {} for {}", status, url)));
    }

    let body = response.text().map_err(crate::core::error::LiftError::from)?;
    if let Some(expect) = &self.expect
      && !body.contains(expect)
    {
      self.outcome = Outcome::Failed;
      return Err(StepError::halt(format!(
        "CI status for branch \"{}\" did not report \"{}\".",
        ctx.project.branch, expect
      )));
    }

    log::info!("CI is green for branch \"{}\".", ctx.project.branch);
    self.outcome = Outcome::Succeeded;
    Ok(())
  }

  fn outcome(&self) -> Outcome {
    self.outcome
  }
}

/// Print a warning on the screen and in the log file, then continue.
pub struct Warn {
  message: String,
  outcome: Outcome,
}

impl Warn {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      outcome: Outcome::Pending,
    }
  }
}

impl Step for Warn {
  fn name(&self) -> String {
    "warn".to_string()
  }

  fn execute(&mut self, _ctx: &mut ReleaseContext) -> StepResult<()> {
    log::warn!("{}", self.message);
    self.outcome = Outcome::Succeeded;
    Ok(())
  }

  fn outcome(&self) -> Outcome {
    self.outcome
  }
}
