//! Report generation for dependency graphs and diffs.
//!
//! Graph reports:
//! - Text: indented dependency tree per section
//! - DOT: GraphViz source with one cluster per section
//! - JSON: ordered nodes and edges
//!
//! Diff reports:
//! - Text: annotated lines with `>>>`/`<<<`/`|||` change markers
//! - JSON: the difference tree with a leaf summary
//!
//! # Security
//!
//! Entity names come from the template. The [`escape`] module keeps them
//! from breaking DOT syntax or emitting terminal control sequences.

mod compact;
mod diff_text;
mod dot;
pub mod escape;
mod json;
mod tree;
mod types;

pub use compact::compact;
pub use diff_text::{render, DiffRenderer};
pub use dot::DotReporter;
pub use json::{JsonDiffReporter, JsonGraphReporter};
pub use tree::TreeReporter;
pub use types::{DiffFormat, GraphFormat, ReportConfig};

use crate::diff::DiffNode;
use crate::graph::Graph;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<ReportError> for crate::error::CfnToolsError {
    fn from(err: ReportError) -> Self {
        use crate::error::ReportErrorKind;

        let kind = match err {
            ReportError::SerializationError(msg) => ReportErrorKind::JsonSerializationError(msg),
            other => ReportErrorKind::UnsupportedFormat(other.to_string()),
        };
        Self::report("generating report", kind)
    }
}

/// Trait for dependency graph report generators
pub trait GraphReporter {
    /// Generate a report for a built graph
    fn generate(&self, graph: &Graph) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_to(&self, graph: &Graph, writer: &mut dyn Write) -> Result<(), ReportError> {
        let report = self.generate(graph)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> GraphFormat;
}

/// Trait for diff report generators
pub trait DiffReporter {
    /// Generate a report for a difference tree
    fn generate(&self, diff: &DiffNode) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_to(&self, diff: &DiffNode, writer: &mut dyn Write) -> Result<(), ReportError> {
        let report = self.generate(diff)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> DiffFormat;
}

/// Create a graph report generator with color control
#[must_use]
pub fn create_graph_reporter(format: GraphFormat, use_color: bool) -> Box<dyn GraphReporter> {
    create_graph_reporter_with_config(format, &ReportConfig::new().with_color(use_color))
}

/// Create a graph report generator from a full report configuration
#[must_use]
pub fn create_graph_reporter_with_config(
    format: GraphFormat,
    config: &ReportConfig,
) -> Box<dyn GraphReporter> {
    match format {
        GraphFormat::Text => Box::new(
            TreeReporter::new()
                .all(config.show_all)
                .both(config.show_used_by)
                .colored(config.use_color),
        ),
        GraphFormat::Dot => Box::new(DotReporter::new()),
        GraphFormat::Json => Box::new(JsonGraphReporter::new()),
    }
}

/// Create a diff report generator from a report configuration
#[must_use]
pub fn create_diff_reporter(format: DiffFormat, config: &ReportConfig) -> Box<dyn DiffReporter> {
    match format {
        DiffFormat::Text => Box::new(
            DiffRenderer::new()
                .colorize(config.use_color)
                .show_unchanged(config.show_unchanged),
        ),
        DiffFormat::Json => Box::new(JsonDiffReporter::new()),
    }
}

/// Terminal colours used by the text reporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Dim,
}

/// Apply ANSI color formatting if colored output is enabled.
pub(crate) fn ansi_color(text: &str, color: Color, colored: bool) -> String {
    if !colored {
        return text.to_string();
    }
    let code = match color {
        Color::Red => "31",
        Color::Green => "32",
        Color::Yellow => "33",
        Color::Blue => "34",
        Color::Dim => "2",
    };
    format!("\x1b[{code}m{text}\x1b[0m")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_color() {
        assert_eq!(ansi_color("x", Color::Green, true), "\x1b[32mx\x1b[0m");
        assert_eq!(ansi_color("x", Color::Green, false), "x");
    }

    #[test]
    fn test_factories_report_their_format() {
        for format in [GraphFormat::Text, GraphFormat::Dot, GraphFormat::Json] {
            assert_eq!(create_graph_reporter(format, false).format(), format);
        }
        for format in [DiffFormat::Text, DiffFormat::Json] {
            assert_eq!(
                create_diff_reporter(format, &ReportConfig::default()).format(),
                format
            );
        }
    }
}
