//! Unified error types for cfn-tools.
//!
//! This module provides the error hierarchy for the library, with context
//! chaining for debugging and user-friendly messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cfn-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CfnToolsError {
    /// Errors during template parsing
    #[error("Failed to parse template: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors while building a dependency graph
    #[error("Graph construction failed: {context}")]
    Graph {
        context: String,
        #[source]
        source: GraphErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid YAML: {0}")]
    InvalidYaml(String),

    #[error("Mapping key must be a scalar, found {0}")]
    NonScalarKey(String),
}

/// Specific graph error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GraphErrorKind {
    #[error("Template must be a mapping at the top level, found {found}")]
    NotAMapping { found: String },

    #[error("Section '{section}' must be a mapping, found {found}")]
    MalformedSection { section: String, found: String },
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for cfn-tools operations
pub type Result<T> = std::result::Result<T, CfnToolsError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl CfnToolsError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a graph error with context
    pub fn graph(context: impl Into<String>, source: GraphErrorKind) -> Self {
        Self::Graph {
            context: context.into(),
            source,
        }
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for CfnToolsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for CfnToolsError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse("YAML deserialization", ParseErrorKind::InvalidYaml(err.to_string()))
    }
}

impl From<serde_json::Error> for CfnToolsError {
    fn from(err: serde_json::Error) -> Self {
        Self::report(
            "JSON serialization",
            ReportErrorKind::JsonSerializationError(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Each call prepends its context to the error's existing context, building
/// a chain that shows the path through the code.
///
/// ```ignore
/// use cfn_tools::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<Document> {
///     let content = std::fs::read_to_string(path).context("reading template")?;
///     parse_template_str(&content).with_context(|| format!("parsing {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<CfnToolsError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: CfnToolsError, new_ctx: &str) -> CfnToolsError {
    match err {
        CfnToolsError::Parse {
            context: existing,
            source,
        } => CfnToolsError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CfnToolsError::Graph {
            context: existing,
            source,
        } => CfnToolsError::Graph {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CfnToolsError::Report {
            context: existing,
            source,
        } => CfnToolsError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        CfnToolsError::Io {
            path,
            message,
            source,
        } => CfnToolsError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        CfnToolsError::Config(msg) => CfnToolsError::Config(chain_context(new_ctx, &msg)),
        CfnToolsError::Validation(msg) => CfnToolsError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
