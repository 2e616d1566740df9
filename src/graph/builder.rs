//! Dependency graph construction from a template.

use super::classify::{classify, section};
use super::digraph::Graph;
use super::refs::{extract_references_with, strip_attribute};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::Result;
use crate::model::{Category, Document, Entity};

/// Prefix of pseudo parameters provided by the environment.
pub const DEFAULT_BUILTIN_PREFIX: &str = "AWS::";

/// Builder for template dependency graphs.
#[derive(Debug, Clone)]
#[must_use]
pub struct GraphBuilder {
    builtin_prefix: String,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            builtin_prefix: DEFAULT_BUILTIN_PREFIX.to_string(),
        }
    }

    /// Names with this prefix resolve to `Parameters` pseudo-entities even
    /// when the template does not declare them.
    pub fn builtin_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.builtin_prefix = prefix.into();
        self
    }

    /// Build the graph for `document`.
    ///
    /// Every entry of `Resources` and `Outputs` becomes a node, with an edge
    /// to each entity it references. References that resolve to nothing are
    /// reported to `sink` and dropped. Only a document whose sections cannot
    /// be read is an error.
    pub fn build(&self, document: &Document, sink: &mut dyn DiagnosticSink) -> Result<Graph> {
        let names = classify(document)?;
        let mut graph = Graph::new();

        for category in [Category::Resources, Category::Outputs] {
            let Some(entries) = section(document, category)? else {
                continue;
            };

            for (name, body) in entries {
                let from = Entity::new(category, name.as_str());
                graph.add_node(from.clone());

                for reference in extract_references_with(body, sink) {
                    let target = strip_attribute(&reference);
                    let to_category = match names.get(target) {
                        Some(found) => *found,
                        None if self.is_builtin(target) => Category::Parameters,
                        None => {
                            sink.report(Diagnostic::unresolved(target, from.to_string()));
                            continue;
                        }
                    };
                    graph.add_edge(from.clone(), Entity::new(to_category, target));
                }
            }
        }

        tracing::debug!(
            "Built dependency graph with {} entities and {} edges",
            graph.len(),
            graph.edge_count()
        );
        Ok(graph)
    }

    fn is_builtin(&self, name: &str) -> bool {
        !self.builtin_prefix.is_empty() && name.starts_with(&self.builtin_prefix)
    }
}

impl Graph<Entity> {
    /// Build a template graph with default settings, logging diagnostics.
    pub fn build(document: &Document) -> Result<Self> {
        GraphBuilder::new().build(document, &mut TracingSink)
    }

    /// Entities in dependency order: by depth, then by `"category/name"`.
    #[must_use]
    pub fn ordered_entities(&self) -> Vec<Entity> {
        self.ordered()
    }

    /// Entities in the order they were first seen.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.nodes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CfnToolsError, GraphErrorKind};
    use crate::parsers::parse_template_str;
    use serde_json::json;

    const TEMPLATE: &str = r"
Parameters:
  Name:
    Type: String
Resources:
  Bucket:
    Type: AWS::S3::Bucket
    Properties:
      BucketName: !Ref Name
      Tags:
        - Key: Account
        - Value: !Ref AWS::AccountId
Outputs:
  BucketName:
    Value: !Ref Bucket
  BucketArn:
    Value: !GetAtt Bucket.Arn
";

    fn names(entities: &[Entity]) -> Vec<String> {
        entities.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_ordered_entities() {
        let graph = Graph::build(&parse_template_str(TEMPLATE).unwrap()).unwrap();
        assert_eq!(
            names(&graph.ordered_entities()),
            vec![
                "Parameters/AWS::AccountId",
                "Parameters/Name",
                "Resources/Bucket",
                "Outputs/BucketArn",
                "Outputs/BucketName",
            ]
        );
    }

    #[test]
    fn test_dependencies() {
        let graph = Graph::build(&parse_template_str(TEMPLATE).unwrap()).unwrap();
        assert!(graph.dependencies_of(&Entity::parameter("Name")).is_empty());
        assert_eq!(
            names(&graph.dependencies_of(&Entity::resource("Bucket"))),
            vec!["Parameters/AWS::AccountId", "Parameters/Name"]
        );
        assert_eq!(
            names(&graph.dependencies_of(&Entity::output("BucketName"))),
            vec!["Resources/Bucket"]
        );
    }

    #[test]
    fn test_dependents() {
        let graph = Graph::build(&parse_template_str(TEMPLATE).unwrap()).unwrap();
        assert_eq!(
            names(&graph.dependents_of(&Entity::parameter("Name"))),
            vec!["Resources/Bucket"]
        );
        assert_eq!(
            names(&graph.dependents_of(&Entity::resource("Bucket"))),
            vec!["Outputs/BucketArn", "Outputs/BucketName"]
        );
        assert!(graph.dependents_of(&Entity::output("BucketName")).is_empty());
    }

    #[test]
    fn test_entities_in_insertion_order() {
        let graph = Graph::build(&parse_template_str(TEMPLATE).unwrap()).unwrap();
        let seen: Vec<String> = graph.entities().map(ToString::to_string).collect();
        assert_eq!(
            seen,
            vec![
                "Resources/Bucket",
                "Parameters/Name",
                "Parameters/AWS::AccountId",
                "Outputs/BucketName",
                "Outputs/BucketArn",
            ]
        );
    }

    #[test]
    fn test_unresolved_reference_is_diagnostic_only() {
        let doc = Document::from(json!({
            "Resources": {
                "Queue": {"Properties": {"Target": {"Ref": "Missing"}}}
            }
        }));
        let mut sink: Vec<Diagnostic> = Vec::new();
        let graph = GraphBuilder::new().build(&doc, &mut sink).unwrap();

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(sink, vec![Diagnostic::unresolved("Missing", "Resources/Queue")]);
    }

    #[test]
    fn test_isolated_entities_are_nodes() {
        let doc = Document::from(json!({
            "Parameters": {"Unused": {"Type": "String"}},
            "Resources": {"Lonely": {"Type": "AWS::SNS::Topic"}},
            "Outputs": {"Constant": {"Value": "42"}}
        }));
        let graph = Graph::build(&doc).unwrap();

        assert!(graph.contains(&Entity::resource("Lonely")));
        assert!(graph.contains(&Entity::output("Constant")));
        // Parameters only become nodes once something references them
        assert!(!graph.contains(&Entity::parameter("Unused")));
    }

    #[test]
    fn test_custom_builtin_prefix() {
        let doc = Document::from(json!({
            "Resources": {"Fn": {"Properties": {"R": {"Ref": "Custom::Thing"}}}}
        }));
        let mut sink: Vec<Diagnostic> = Vec::new();
        let graph = GraphBuilder::new()
            .builtin_prefix("Custom::")
            .build(&doc, &mut sink)
            .unwrap();

        assert!(sink.is_empty());
        assert_eq!(
            graph.dependencies_of(&Entity::resource("Fn")),
            vec![Entity::parameter("Custom::Thing")]
        );
    }

    #[test]
    fn test_malformed_sections_are_fatal() {
        let doc = Document::from(json!({"Outputs": "nope"}));
        assert!(matches!(
            Graph::build(&doc),
            Err(CfnToolsError::Graph {
                source: GraphErrorKind::MalformedSection { .. },
                ..
            })
        ));
        assert!(Graph::build(&Document::string("text")).is_err());
    }
}
