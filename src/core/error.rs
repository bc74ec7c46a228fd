//! Error types for liftoff with contextual messages
//!
//! Two failure channels exist and are never conflated:
//!
//! - [`StepError::Halt`] — an expected, operator-facing stop condition raised
//!   by a step (bad branch, dirty tree, invalid version, declined
//!   confirmation, failed command). The controller rolls back and the process
//!   exits with the failing step's own exit code.
//! - [`StepError::Defect`] — anything else. The controller still rolls back,
//!   then propagates the original error unmodified; this path indicates a bug
//!   rather than an anticipated release-process condition.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for liftoff
#[derive(Debug)]
pub enum LiftError {
  /// Configuration errors
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// HTTP errors (CI status checks)
  Http(String),

  /// Generic error with message and optional help text
  Message { message: String, help: Option<String> },
}

impl LiftError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    LiftError::Message {
      message: msg.into(),
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    LiftError::Message {
      message: msg.into(),
      help: Some(help.into()),
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      LiftError::Config(e) => e.help_message(),
      LiftError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for LiftError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LiftError::Config(e) => write!(f, "{}", e),
      LiftError::Io(e) => write!(f, "I/O error: {}", e),
      LiftError::Http(e) => write!(f, "HTTP error: {}", e),
      LiftError::Message { message, .. } => write!(f, "{}", message),
    }
  }
}

impl std::error::Error for LiftError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      LiftError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for LiftError {
  fn from(err: io::Error) -> Self {
    LiftError::Io(err)
  }
}

impl From<String> for LiftError {
  fn from(msg: String) -> Self {
    LiftError::message(msg)
  }
}

impl From<&str> for LiftError {
  fn from(msg: &str) -> Self {
    LiftError::message(msg)
  }
}

impl From<toml_edit::TomlError> for LiftError {
  fn from(err: toml_edit::TomlError) -> Self {
    LiftError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for LiftError {
  fn from(err: toml_edit::de::Error) -> Self {
    LiftError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for LiftError {
  fn from(err: toml_edit::ser::Error) -> Self {
    LiftError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for LiftError {
  fn from(err: serde_json::Error) -> Self {
    LiftError::message(format!("JSON error: {}", err))
  }
}

impl From<reqwest::Error> for LiftError {
  fn from(err: reqwest::Error) -> Self {
    LiftError::Http(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// liftoff.toml not found
  NotFound { project_root: PathBuf },

  /// Missing required field
  MissingField { field: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `liftoff init` to create a configuration file.".to_string()),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { project_root } => {
        write!(
          f,
          "No liftoff configuration found.\nExpected file: {}/liftoff.toml",
          project_root.display()
        )
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
    }
  }
}

/// Result type alias for liftoff
pub type LiftResult<T> = Result<T, LiftError>;

/// Failure channel for a single step execution
#[derive(Debug)]
pub enum StepError {
  /// Controlled stop: the release must not continue. Carries the
  /// operator-facing reason; the step's exit code travels separately.
  Halt(String),

  /// Unexpected defect: propagated to the caller after the rollback sweep.
  Defect(LiftError),
}

impl StepError {
  /// Create a controlled-stop error
  pub fn halt(reason: impl Into<String>) -> Self {
    StepError::Halt(reason.into())
  }
}

impl fmt::Display for StepError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StepError::Halt(reason) => write!(f, "{}", reason),
      StepError::Defect(e) => write!(f, "{}", e),
    }
  }
}

impl std::error::Error for StepError {}

impl From<LiftError> for StepError {
  fn from(err: LiftError) -> Self {
    StepError::Defect(err)
  }
}

impl From<io::Error> for StepError {
  fn from(err: io::Error) -> Self {
    StepError::Defect(LiftError::Io(err))
  }
}

/// Result type for step execution
pub type StepResult<T> = Result<T, StepError>;

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &LiftError) {
  eprintln!("\nerror: {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("help: {}\n", help);
  }
}
