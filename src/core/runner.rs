//! Synchronous shell command execution
//!
//! Runs one external command through the platform shell, blocks until it
//! terminates, and captures the exit status together with the combined
//! stdout+stderr text. Several steps parse or validate that text, so the
//! exit code alone is never enough. There is no timeout and no cancellation:
//! a hung external command hangs the whole pipeline (documented limitation).

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Result of running one command
#[derive(Debug, Clone)]
pub struct CommandOutput {
  /// Process exit code (-1 when terminated by a signal)
  pub code: i32,
  /// Trimmed stdout followed by trimmed stderr
  pub text: String,
}

impl CommandOutput {
  pub fn success(&self) -> bool {
    self.code == 0
  }
}

/// Shell command runner bound to a working directory
#[derive(Debug, Clone)]
pub struct CommandRunner {
  workdir: PathBuf,
}

impl CommandRunner {
  pub fn new(workdir: impl Into<PathBuf>) -> Self {
    Self {
      workdir: workdir.into(),
    }
  }

  pub fn workdir(&self) -> &Path {
    &self.workdir
  }

  /// Run a command through the shell and wait for it to terminate.
  ///
  /// `stdin_text`, when given, is written to the child's stdin before the
  /// stream is closed. Both output streams are captured fully; stdout is
  /// logged at debug level and stderr at warn level.
  pub fn run(&self, command: &str, stdin_text: Option<&str>) -> std::io::Result<CommandOutput> {
    let mut child = shell_command(command)
      .current_dir(&self.workdir)
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()?;

    if let Some(text) = stdin_text
      && let Some(mut stdin) = child.stdin.take()
    {
      stdin.write_all(text.as_bytes())?;
    }
    // Dropping the handle closes the child's stdin
    drop(child.stdin.take());

    let output = child.wait_with_output()?;
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if !stdout.is_empty() {
      log::debug!("{}", stdout);
    }
    if !stderr.is_empty() {
      log::warn!("{}", stderr);
    }

    Ok(CommandOutput {
      code: output.status.code().unwrap_or(-1),
      text: format!("{}{}", stdout, stderr),
    })
  }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
  let mut cmd = Command::new("sh");
  cmd.arg("-c").arg(command);
  cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
  let mut cmd = Command::new("cmd");
  cmd.arg("/C").arg(command);
  cmd
}

#[cfg(test)]
mod tests {
  use super::*;

  fn runner() -> CommandRunner {
    CommandRunner::new(std::env::temp_dir())
  }

  #[test]
  #[cfg(unix)]
  fn test_run_captures_stdout() {
    let out = runner().run("echo hello", None).unwrap();
    assert_eq!(out.code, 0);
    assert!(out.success());
    assert_eq!(out.text, "hello");
  }

  #[test]
  #[cfg(unix)]
  fn test_run_reports_exit_code() {
    let out = runner().run("exit 3", None).unwrap();
    assert_eq!(out.code, 3);
    assert!(!out.success());
  }

  #[test]
  #[cfg(unix)]
  fn test_run_combines_stdout_and_stderr() {
    let out = runner().run("echo out; echo err >&2", None).unwrap();
    assert_eq!(out.text, "outerr");
  }

  #[test]
  #[cfg(unix)]
  fn test_run_feeds_stdin() {
    let out = runner().run("cat", Some("piped input")).unwrap();
    assert_eq!(out.code, 0);
    assert_eq!(out.text, "piped input");
  }

  #[test]
  #[cfg(unix)]
  fn test_run_uses_workdir() {
    let dir = tempfile::tempdir().unwrap();
    let out = CommandRunner::new(dir.path()).run("pwd", None).unwrap();
    let reported = std::fs::canonicalize(out.text).unwrap();
    assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
  }
}
