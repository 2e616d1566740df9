//! Pipeline orchestration for template operations.
//!
//! Shared parse → analyse → report plumbing used by the CLI command handlers.

mod output;
mod parse;

pub use output::{should_use_color, write_output, OutputTarget};
pub use parse::{parse_template_with_context, parse_template_with_parser, ParsedTemplate};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse a template file
    #[error("Parse failed for {path}: {source}")]
    ParseFailed {
        path: String,
        source: anyhow::Error,
    },

    /// The template's sections could not be read into a graph
    #[error("Graph failed: {source}")]
    GraphFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or changes without --fail-on-change)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected and --fail-on-change was set
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
