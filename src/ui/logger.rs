//! Release log sink
//!
//! Severity-leveled, append-only stream behind the `log` facade: the screen
//! shows messages at the configured verbosity (warnings and errors coloured
//! and routed to stderr), while the log file receives everything down to
//! debug level with timestamps. One log file per run, truncated at start.

use crate::core::error::{LiftError, LiftResult};
use anstyle::{AnsiColor, Color, Style};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

struct ReleaseLog {
  screen_level: LevelFilter,
  file: Option<Mutex<File>>,
}

impl Log for ReleaseLog {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= LevelFilter::Debug
  }

  fn log(&self, record: &Record) {
    if record.level() <= self.screen_level {
      match record.level() {
        Level::Error => {
          let style = Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red)));
          eprintln!("{}error:{} {}", style.render(), style.render_reset(), record.args());
        }
        Level::Warn => {
          let style = Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
          eprintln!("{}warning:{} {}", style.render(), style.render_reset(), record.args());
        }
        _ => println!("{}", record.args()),
      }
    }

    if let Some(file) = &self.file
      && let Ok(mut file) = file.lock()
    {
      let _ = writeln!(
        file,
        "{} {:<5} {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        record.level(),
        record.args()
      );
    }
  }

  fn flush(&self) {
    if let Some(file) = &self.file
      && let Ok(mut file) = file.lock()
    {
      let _ = file.flush();
    }
  }
}

/// Install the release log sink. `screen_level` filters the terminal only;
/// the log file, when configured, always records at debug level.
pub fn init(screen_level: LevelFilter, log_file: Option<&Path>) -> LiftResult<()> {
  let file = match log_file {
    Some(path) => Some(Mutex::new(File::create(path)?)),
    None => None,
  };
  log::set_boxed_logger(Box::new(ReleaseLog { screen_level, file }))
    .map_err(|e| LiftError::message(format!("Failed to install logger: {}", e)))?;
  log::set_max_level(LevelFilter::Debug);
  Ok(())
}

/// Parse a verbosity name from the config file
pub fn level_from_str(value: &str) -> LiftResult<LevelFilter> {
  match value {
    "debug" => Ok(LevelFilter::Debug),
    "info" => Ok(LevelFilter::Info),
    "warn" | "warning" => Ok(LevelFilter::Warn),
    "error" => Ok(LevelFilter::Error),
    other => Err(LiftError::with_help(
      format!("Unknown verbosity {:?}", other),
      "Use one of: debug, info, warn, error.",
    )),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_level_from_str() {
    assert_eq!(level_from_str("debug").unwrap(), LevelFilter::Debug);
    assert_eq!(level_from_str("warning").unwrap(), LevelFilter::Warn);
    assert!(level_from_str("loud").is_err());
  }
}
