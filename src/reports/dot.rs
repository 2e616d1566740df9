//! GraphViz DOT report.

use super::escape::escape_dot;
use super::{GraphFormat, GraphReporter, ReportError};
use crate::graph::Graph;
use crate::model::{Category, Entity};
use std::fmt::Write;

/// GraphViz source with one cluster per section.
///
/// Edges are drawn from the dependency to the dependent, so with
/// `rankdir=LR` the graph reads left to right in creation order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotReporter;

impl DotReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

const fn shape(category: Category) -> &'static str {
    match category {
        Category::Parameters => "diamond",
        Category::Resources => "Mrecord",
        Category::Outputs => "rectangle",
    }
}

fn node_id(entity: &Entity) -> String {
    escape_dot(&format!("{}: {}", entity.category, entity.name))
}

impl GraphReporter for DotReporter {
    fn generate(&self, graph: &Graph) -> Result<String, ReportError> {
        let ordered = graph.ordered_entities();
        let mut out = String::new();

        out.push_str("digraph {\n");
        out.push_str("    rankdir=LR;\n");
        out.push_str("    concentrate=true;\n");

        for category in Category::ALL {
            writeln!(out, "    subgraph cluster_{category} {{")?;
            writeln!(out, "        label=\"{category}\";")?;
            for entity in ordered.iter().filter(|e| e.category == category) {
                writeln!(
                    out,
                    "        \"{}\" [label=\"{}\" shape={}];",
                    node_id(entity),
                    escape_dot(&entity.name),
                    shape(category)
                )?;
            }
            out.push_str("    }\n\n");
        }

        for from in &ordered {
            for to in graph.dependencies_of(from) {
                writeln!(out, "    \"{}\" -> \"{}\";", node_id(&to), node_id(from))?;
            }
        }

        out.push_str("}\n");
        Ok(out)
    }

    fn format(&self) -> GraphFormat {
        GraphFormat::Dot
    }
}
