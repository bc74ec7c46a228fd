//! Core engine of the release pipeline
//!
//! The fundamental building blocks, leaves first:
//!
//! - **version**: the release-scoped version state machine and its
//!   validation rules (grammar, dev markers, numeric ordering)
//! - **runner**: synchronous shell command execution with full output capture
//! - **version_file**: the quoted-version assignment contract of the
//!   versioned artifact file
//! - **step**: the capability contract every pipeline step satisfies
//! - **context**: the single shared state value of one release run
//! - **releaser**: the sequential execution/failure/rollback controller
//!
//! Everything here is single-threaded and fully sequential: at most one step,
//! and at most one subprocess, executes at any instant.

pub mod config;
pub mod context;
pub mod error;
pub mod releaser;
pub mod runner;
pub mod step;
pub mod version;
pub mod version_file;
