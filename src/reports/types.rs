//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for dependency graph reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    /// Indented dependency tree
    #[default]
    Text,
    /// GraphViz DOT
    Dot,
    /// Structured JSON nodes and edges
    Json,
}

impl std::fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Dot => write!(f, "dot"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Output format for diff reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DiffFormat {
    /// Annotated text with change markers
    #[default]
    Text,
    /// Difference tree as JSON
    Json,
}

impl std::fmt::Display for DiffFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Emit ANSI colours
    pub use_color: bool,
    /// Tree: include entities without any links
    pub show_all: bool,
    /// Tree: list dependents (`UsedBy`) as well as dependencies
    pub show_used_by: bool,
    /// Diff: show unchanged entries and the old value of removed ones
    pub show_unchanged: bool,
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }
}
