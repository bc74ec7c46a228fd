//! `liftoff plan`: show the pipeline without executing anything

use crate::core::config::LiftConfig;
use crate::core::error::{LiftError, LiftResult};
use std::path::Path;

/// Print the steps `liftoff run` would execute, in order.
pub fn run_plan(workdir: &Path, json: bool) -> LiftResult<()> {
  let config = LiftConfig::load(workdir)?;
  let pipeline = config.pipeline();

  if json {
    println!(
      "{}",
      serde_json::to_string_pretty(&pipeline).map_err(LiftError::from)?
    );
    return Ok(());
  }

  println!("Release pipeline for {}:", config.project.name);
  for (index, spec) in pipeline.iter().enumerate() {
    println!("  {:>2}. {}", index + 1, spec.label());
  }
  if config.steps.is_empty() {
    println!("\n(stock pipeline; add [[steps]] to liftoff.toml to customize)");
  }
  Ok(())
}
