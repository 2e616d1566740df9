//! JSON report generators.

use super::{DiffFormat, DiffReporter, GraphFormat, GraphReporter, ReportError};
use crate::diff::{ChangeType, DiffNode, DiffSummary};
use crate::graph::Graph;
use crate::model::Category;
use serde::Serialize;

#[derive(Serialize)]
struct JsonNode<'a> {
    id: String,
    category: Category,
    name: &'a str,
    depth: usize,
}

#[derive(Serialize)]
struct JsonEdge {
    from: String,
    to: String,
}

#[derive(Serialize)]
struct JsonGraph<'a> {
    tool: &'static str,
    version: &'static str,
    nodes: Vec<JsonNode<'a>>,
    edges: Vec<JsonEdge>,
}

#[derive(Serialize)]
struct JsonDiff<'a> {
    tool: &'static str,
    version: &'static str,
    change: ChangeType,
    summary: DiffSummary,
    diff: &'a DiffNode,
}

/// JSON graph report: nodes in dependency order, edges sorted.
#[derive(Debug, Clone)]
pub struct JsonGraphReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonGraphReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonGraphReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphReporter for JsonGraphReporter {
    fn generate(&self, graph: &Graph) -> Result<String, ReportError> {
        let ordered = graph.ordered_entities();
        let nodes = ordered
            .iter()
            .map(|entity| JsonNode {
                id: entity.to_string(),
                category: entity.category,
                name: &entity.name,
                depth: graph.depth(entity),
            })
            .collect();
        let edges = graph
            .edges()
            .into_iter()
            .map(|(from, to)| JsonEdge {
                from: from.to_string(),
                to: to.to_string(),
            })
            .collect();

        let report = JsonGraph {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            nodes,
            edges,
        };
        to_json(&report, self.pretty)
    }

    fn format(&self) -> GraphFormat {
        GraphFormat::Json
    }
}

/// JSON diff report: overall change, leaf summary and the full tree.
#[derive(Debug, Clone)]
pub struct JsonDiffReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonDiffReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonDiffReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffReporter for JsonDiffReporter {
    fn generate(&self, diff: &DiffNode) -> Result<String, ReportError> {
        let report = JsonDiff {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            change: diff.change_type(),
            summary: diff.summary(),
            diff,
        };
        to_json(&report, self.pretty)
    }

    fn format(&self) -> DiffFormat {
        DiffFormat::Json
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, ReportError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    Ok(text)
}
