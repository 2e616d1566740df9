//! Structural diff of template documents.
//!
//! [`compare`] walks two [`Document`](crate::model::Document) trees side by
//! side and produces a [`DiffNode`] tree that classifies every value as
//! added, removed, changed or unchanged.
//!
//! # Example
//!
//! ```
//! use cfn_tools::diff::{compare, ChangeType};
//! use cfn_tools::model::Document;
//! use serde_json::json;
//!
//! let old = Document::from(json!({"foo": "bar"}));
//! let new = Document::from(json!({"foo": "bar", "baz": "quux"}));
//!
//! let diff = compare(&old, &new);
//! assert_eq!(diff.change_type(), ChangeType::Added);
//! assert_eq!(diff.summary().added, 1);
//! ```

mod engine;
mod result;

pub use engine::{compare, compare_templates};
pub use result::{ChangeType, DiffNode, DiffSummary};
