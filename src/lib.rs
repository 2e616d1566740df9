//! **Dependency graphs and structural diffs for CloudFormation templates.**
//!
//! `cfn-tools` reads CloudFormation templates (YAML or JSON, including the
//! short-form intrinsic tags such as `!Ref` and `!GetAtt`) into a generic
//! document tree and offers two analyses over it:
//!
//! - a **dependency graph** between the template's Parameters, Resources and
//!   Outputs, built from `Ref`, `Fn::GetAtt`, `Fn::Sub` placeholders and
//!   `DependsOn`, and
//! - a **structural diff** between two templates, annotated per key and per
//!   list index as added, removed, changed or unchanged.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the [`Document`] tree and the [`Entity`] identity of
//!   graph nodes.
//! - **[`parsers`]**: [`TemplateParser`] turns YAML text into a `Document`,
//!   rewriting tags through a [`TagTable`].
//! - **[`graph`]**: reference extraction, classification and the generic
//!   [`Graph`] with depth-first dependency ordering.
//! - **[`diff`]**: [`compare`] produces a [`DiffNode`] tree.
//! - **[`reports`]**: text, DOT and JSON renderers for graphs and diffs.
//! - **[`diagnostics`]**: unresolved references and malformed intrinsics are
//!   reported to a [`DiagnosticSink`] rather than failing the build.
//!
//! ## Building a dependency graph
//!
//! ```
//! use cfn_tools::{parse_template_str, Graph};
//!
//! let doc = parse_template_str(
//!     "Resources:\n  Bucket:\n    Type: AWS::S3::Bucket\n\
//!      Outputs:\n  Name:\n    Value: !Ref Bucket\n",
//! )?;
//! let graph = Graph::build(&doc)?;
//!
//! let order: Vec<String> = graph.ordered_entities().iter().map(ToString::to_string).collect();
//! assert_eq!(order, ["Resources/Bucket", "Outputs/Name"]);
//! # Ok::<(), cfn_tools::CfnToolsError>(())
//! ```
//!
//! ## Diffing two templates
//!
//! ```
//! use cfn_tools::{compare, parse_template_str, render, ChangeType};
//!
//! let old = parse_template_str("foo: bar\n")?;
//! let new = parse_template_str("foo: bar\nbaz: quux\n")?;
//! let diff = compare(&old, &new);
//!
//! assert_eq!(diff.change_type(), ChangeType::Added);
//! assert_eq!(render(&diff, false), ">>> baz: quux\n");
//! # Ok::<(), cfn_tools::CfnToolsError>(())
//! ```

#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    // `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod diff;
pub mod error;
pub mod graph;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, NullSink, TracingSink};
pub use diff::{compare, compare_templates, ChangeType, DiffNode, DiffSummary};
pub use error::{CfnToolsError, ErrorContext, Result};
pub use graph::{extract_references, Graph, GraphBuilder};
pub use model::{Category, Document, Entity};
pub use parsers::{parse_template, parse_template_str, TagTable, TemplateParser};
pub use reports::{render, DiffFormat, DiffRenderer, GraphFormat};
