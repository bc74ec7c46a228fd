//! Integration tests for liftoff
//!
//! Each test builds a throwaway git repository and drives the release
//! pipeline against it through the library surface.

mod helpers;
mod test_git_steps;
mod test_pipeline;
