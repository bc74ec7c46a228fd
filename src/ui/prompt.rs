//! Blocking stdin prompts
//!
//! Both prompts write to stderr so they stay visible when stdout is piped.
//! In non-interactive mode (`--yes`) every question resolves to its default
//! without touching stdin.

use std::io::{self, BufRead, Write};

/// Ask a yes/no question. Returns `default` when the answer is empty, on
/// read errors, or when `assume_yes` short-circuits the prompt.
pub fn confirm(question: &str, default: bool, assume_yes: bool) -> bool {
  if assume_yes {
    log::debug!("Assuming default answer for: {}", question);
    return default;
  }

  let suffix = if default { "[Y/n]" } else { "[y/N]" };
  eprint!("{} {}: ", question, suffix);
  io::stderr().flush().ok();

  let mut input = String::new();
  if io::stdin().lock().read_line(&mut input).is_err() {
    return default;
  }

  let trimmed = input.trim().to_lowercase();
  if trimmed.is_empty() {
    return default;
  }
  trimmed.starts_with('y')
}

/// Ask for a line of free-text input. Returns `None` on a read error or when
/// the answer is empty.
pub fn input(question: &str) -> Option<String> {
  eprint!("{} ", question);
  io::stderr().flush().ok();

  let mut line = String::new();
  if io::stdin().lock().read_line(&mut line).is_err() {
    return None;
  }
  let trimmed = line.trim();
  if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_assume_yes_returns_default() {
    assert!(confirm("Continue?", true, true));
    assert!(!confirm("Destroy everything?", false, true));
  }
}
