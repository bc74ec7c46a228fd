//! Versioned-artifact file contract
//!
//! The engine reads and rewrites a version string inside a designated text
//! file, located via a configured keyword (e.g. a `version = "1.2.3"`
//! assignment). Only the quoted value on the first matching line is touched;
//! every other line and every line ending is preserved byte-exactly. After a
//! write the file is re-read to verify the change took.

use crate::core::error::{LiftError, LiftResult};
use crate::core::version::VERSION_PATTERN;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Build the matcher for a quoted-version assignment line.
///
/// Matches `version = "1.2.3"` style lines, allowing up to two leading and
/// trailing underscores around the keyword (`__version__` conventions) and
/// either quote style.
fn assignment_re(keyword: &str) -> LiftResult<Regex> {
  let pattern = format!(
    r#"^\s*_{{0,2}}{}_{{0,2}}\s*=\s*["']({})["']\s*$"#,
    regex::escape(keyword),
    VERSION_PATTERN
  );
  Regex::new(&pattern).map_err(|e| LiftError::message(format!("bad version keyword {:?}: {}", keyword, e)))
}

/// Split one line into its body and its line ending
fn split_ending(line: &str) -> (&str, &str) {
  let body = line.trim_end_matches('\n').trim_end_matches('\r');
  (body, &line[body.len()..])
}

/// Find the version number in `text`, on the first line matching the quoted
/// assignment pattern for `keyword`.
pub fn extract_version(text: &str, keyword: &str) -> LiftResult<Option<String>> {
  let re = assignment_re(keyword)?;
  for line in text.split_inclusive('\n') {
    let (body, _) = split_ending(line);
    if let Some(captures) = re.captures(body) {
      return Ok(Some(captures[1].to_string()));
    }
  }
  Ok(None)
}

/// Replace the version number in `text` with `replacement`, on the first
/// matching line only. All other lines and all line endings are preserved.
pub fn replace_version(text: &str, keyword: &str, replacement: &str) -> LiftResult<String> {
  let re = assignment_re(keyword)?;
  let mut result = String::with_capacity(text.len());
  let mut found = false;
  for line in text.split_inclusive('\n') {
    let (body, ending) = split_ending(line);
    if !found
      && let Some(captures) = re.captures(body)
    {
      found = true;
      let span = captures.get(1).expect("version capture group");
      result.push_str(&body[..span.start()]);
      result.push_str(replacement);
      result.push_str(&body[span.end()..]);
      result.push_str(ending);
    } else {
      result.push_str(line);
    }
  }
  if !found {
    return Err(LiftError::message(format!(
      "Could not find a {} assignment to replace in the versioned file",
      keyword
    )));
  }
  Ok(result)
}

/// Read the version number from the file at `path`.
pub fn read_version(path: &Path, keyword: &str) -> LiftResult<String> {
  let text = fs::read_to_string(path)?;
  extract_version(&text, keyword)?.ok_or_else(|| {
    LiftError::with_help(
      format!("Could not find a {} assignment in {}", keyword, path.display()),
      "Check the version_file and version_keyword settings in liftoff.toml.",
    )
  })
}

/// Write `replacement` as the version number in the file at `path`, then
/// read the file back to verify the written value.
pub fn write_version(path: &Path, keyword: &str, replacement: &str) -> LiftResult<()> {
  let text = fs::read_to_string(path)?;
  let updated = replace_version(&text, keyword, replacement)?;
  fs::write(path, updated)?;
  let reread = read_version(path, keyword)?;
  if reread != replacement {
    return Err(LiftError::message(format!(
      "Verification after write failed: {} now contains \"{}\", expected \"{}\"",
      path.display(),
      reread,
      replacement
    )));
  }
  Ok(())
}
