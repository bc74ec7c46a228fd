//! Release-scoped version state machine
//!
//! Holds the three version identifiers of one release: the old version found
//! in the versioned file before any mutation, the new version being released,
//! and the derived future development version. All format and ordering checks
//! live here so no step can write a decreasing or malformed version into the
//! release artifact.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// Release-version grammar: one or more digits, a dot, one or more digits,
/// optionally followed by further dot/alnum/hyphen/parenthesis segments.
pub const VERSION_PATTERN: &str = r"[0-9]+\.[0-9]+[0-9a-z.()\-]*";

/// Substrings that mark a version as a development version
const DEV_MARKERS: [&str; 3] = ["dev", "svn", "("];

fn validator() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(&format!("^{}$", VERSION_PATTERN)).expect("version validator regex"))
}

/// Validation failures for version identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
  /// Not a valid release-version string
  InvalidFormat { value: String },

  /// Contains a development marker (dev, svn, open parenthesis)
  DevelopmentVersion { value: String },

  /// Not strictly greater than the previously recorded old version
  NotIncreasing { old: String, new: String },

  /// The new version was already recorded for this release
  AlreadySet { value: String },

  /// No new version recorded yet
  Unset,
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionError::InvalidFormat { value } => {
        write!(f, "\"{}\" is not a valid version number", value)
      }
      VersionError::DevelopmentVersion { value } => {
        write!(f, "\"{}\" is a development version number", value)
      }
      VersionError::NotIncreasing { old, new } => {
        write!(f, "the new version \"{}\" must be higher than the current one \"{}\"", new, old)
      }
      VersionError::AlreadySet { value } => {
        write!(f, "the release version was already set to \"{}\"", value)
      }
      VersionError::Unset => write!(f, "no release version has been set"),
    }
  }
}

impl std::error::Error for VersionError {}

/// Compare two dotted version strings segment by segment.
///
/// Segments are compared numerically when both sides have a numeric prefix
/// (`1.10 > 1.9`); when the numeric parts tie, a bare segment outranks one
/// with a trailing pre-release suffix (`0.1.2 > 0.1.2dev`). Missing segments
/// count as zero (`1.2 == 1.2.0`).
pub fn cmp_versions(a: &str, b: &str) -> Ordering {
  let sa: Vec<&str> = a.split('.').collect();
  let sb: Vec<&str> = b.split('.').collect();
  for i in 0..sa.len().max(sb.len()) {
    let ord = cmp_segment(sa.get(i).copied().unwrap_or("0"), sb.get(i).copied().unwrap_or("0"));
    if ord != Ordering::Equal {
      return ord;
    }
  }
  Ordering::Equal
}

fn cmp_segment(a: &str, b: &str) -> Ordering {
  let (na, ra) = split_numeric(a);
  let (nb, rb) = split_numeric(b);
  match (na, nb) {
    (Some(x), Some(y)) if x != y => x.cmp(&y),
    (Some(_), Some(_)) => match (ra.is_empty(), rb.is_empty()) {
      // "2" > "2dev": a suffix marks a pre-release of the same number
      (true, false) => Ordering::Greater,
      (false, true) => Ordering::Less,
      _ => ra.cmp(rb),
    },
    (Some(_), None) => Ordering::Greater,
    (None, Some(_)) => Ordering::Less,
    (None, None) => a.cmp(b),
  }
}

fn split_numeric(seg: &str) -> (Option<u64>, &str) {
  let digits = seg.len() - seg.trim_start_matches(|c: char| c.is_ascii_digit()).len();
  if digits == 0 {
    return (None, seg);
  }
  (seg[..digits].parse().ok(), &seg[digits..])
}

/// Validate a version string against the release grammar.
///
/// With `allow_dev = false`, development markers are also rejected.
pub fn check_version(value: &str, allow_dev: bool) -> Result<(), VersionError> {
  if !validator().is_match(value) {
    return Err(VersionError::InvalidFormat {
      value: value.to_string(),
    });
  }
  if !allow_dev {
    for marker in DEV_MARKERS {
      if value.contains(marker) {
        return Err(VersionError::DevelopmentVersion {
          value: value.to_string(),
        });
      }
    }
  }
  Ok(())
}

/// The three version identifiers of one release
#[derive(Debug, Default, Clone)]
pub struct VersionState {
  old: Option<String>,
  new: Option<String>,
}

impl VersionState {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record the version found in the versioned file before any mutation.
  /// Set once by the step that reads the file; logged for audit.
  pub fn set_old(&mut self, value: impl Into<String>) {
    let value = value.into();
    log::debug!("Old version: {}", value);
    self.old = Some(value);
  }

  pub fn old(&self) -> Option<&str> {
    self.old.as_deref()
  }

  /// Record the version being released. Trims whitespace, validates the
  /// release grammar, rejects development markers, and requires the value to
  /// be strictly greater than the recorded old version. Immutable once set.
  pub fn set_new(&mut self, value: &str) -> Result<(), VersionError> {
    if let Some(existing) = &self.new {
      return Err(VersionError::AlreadySet {
        value: existing.clone(),
      });
    }
    let value = value.trim();
    check_version(value, false)?;
    if let Some(old) = &self.old
      && cmp_versions(old, value) != Ordering::Less
    {
      return Err(VersionError::NotIncreasing {
        old: old.clone(),
        new: value.to_string(),
      });
    }
    log::debug!("Version being released: {}", value);
    self.new = Some(value.to_string());
    Ok(())
  }

  /// Record an already-released version without validation. Used when the
  /// versioned file already carries the release version and the interactive
  /// step was skipped. No effect if a new version was recorded.
  pub fn adopt_new(&mut self, value: impl Into<String>) {
    if self.new.is_none() {
      self.new = Some(value.into());
    }
  }

  pub fn new_version(&self) -> Option<&str> {
    self.new.as_deref()
  }

  /// Derive the next development version: increment the final dot-separated
  /// component of the new version and append the `.dev1` marker. Pure, never
  /// stored.
  pub fn future_version(&self) -> Result<String, VersionError> {
    let version = self.new.as_deref().ok_or(VersionError::Unset)?;
    let mut parts: Vec<String> = version.split('.').map(str::to_string).collect();
    let last = parts.last_mut().expect("split yields at least one part");
    let n: u64 = last.parse().map_err(|_| VersionError::InvalidFormat {
      value: version.to_string(),
    })?;
    *last = (n + 1).to_string();
    Ok(format!("{}.dev1", parts.join(".")))
  }
}
