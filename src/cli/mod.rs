//! CLI command handlers.
//!
//! Testable command handlers invoked by main.rs. Each returns the process
//! exit code on success; errors propagate to the caller.

mod diff;
mod tree;

pub use diff::run_diff;
pub use tree::run_tree;
