//! Template dependency graph.
//!
//! Builds a directed graph between the entities of a template: every
//! resource and output points at the parameters, resources and pseudo
//! parameters it references.
//!
//! ## Pipeline
//!
//! 1. [`classify`] maps declared parameter and resource names to a category.
//! 2. [`extract_references`] collects referenced names from each entity body.
//! 3. [`GraphBuilder`] resolves the names and adds the edges.
//!
//! ## Usage
//!
//! ```no_run
//! use cfn_tools::graph::Graph;
//! use cfn_tools::parsers::parse_template_str;
//!
//! let doc = parse_template_str("Resources: {}").unwrap();
//! let graph = Graph::build(&doc).unwrap();
//! for entity in graph.ordered_entities() {
//!     println!("{entity}: {:?}", graph.dependencies_of(&entity));
//! }
//! ```

mod builder;
mod classify;
mod digraph;
mod refs;

pub use builder::{GraphBuilder, DEFAULT_BUILTIN_PREFIX};
pub use classify::{classify, section};
pub use digraph::Graph;
pub use refs::{extract_references, extract_references_with, strip_attribute, sub_placeholders};
