//! liftoff: scripted, rollback-aware release automation
//!
//! A release is a pipeline of steps executed strictly in order. Steps that
//! can be undone register a rollback; when a later step fails, the already
//! succeeded steps are undone in reverse order. Steps with external side
//! effects (an upload, a push) cannot be undone, and their success makes
//! everything before them final.
//!
//! The crate is primarily a binary, but the library surface is real: the
//! integration tests drive [`core::releaser::Releaser`] directly, and
//! custom steps only need to implement [`core::step::Step`].

pub mod commands;
pub mod core;
pub mod steps;
pub mod ui;
