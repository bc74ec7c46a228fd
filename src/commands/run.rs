//! `liftoff run`: execute the release pipeline

use crate::core::config::LiftConfig;
use crate::core::context::ReleaseContext;
use crate::core::error::LiftResult;
use crate::core::releaser::{ReleaseFailure, Releaser};
use crate::ui::logger;
use std::path::Path;

/// Load the configuration, install the log sinks, and run every configured
/// step. A controlled halt exits the process with the failing step's own
/// exit code after the rollback sweep; a defect is returned to the caller.
pub fn run_release(workdir: &Path, yes: bool, set_version: Option<String>) -> LiftResult<()> {
  let config = LiftConfig::load(workdir)?;

  let level = logger::level_from_str(&config.log.verbosity)?;
  logger::init(level, Some(&workdir.join(&config.log.file)))?;

  let ctx = ReleaseContext::new(config.project.clone(), workdir)
    .assume_yes(yes)
    .preset_version(set_version);
  let steps = config.pipeline().iter().map(|spec| spec.build()).collect();

  match Releaser::new(ctx, steps).release() {
    Ok(_ctx) => Ok(()),
    Err(ReleaseFailure::Halted { exit_code, .. }) => {
      // The step already explained itself; just carry its exit code out
      std::process::exit(exit_code);
    }
    Err(ReleaseFailure::Defect { source, .. }) => Err(source),
  }
}
