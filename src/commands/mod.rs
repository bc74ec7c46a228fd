//! CLI commands for liftoff
//!
//! - **init**: write a commented starter liftoff.toml
//! - **plan**: show the pipeline that `run` would execute
//! - **run**: execute the release pipeline
//!
//! `run` is the only command with side effects; the other two never touch
//! git or the network.

pub mod init;
pub mod plan;
pub mod run;

pub use init::run_init;
pub use plan::run_plan;
pub use run::run_release;
