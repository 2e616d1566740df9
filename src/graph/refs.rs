//! Reference extraction.
//!
//! Walks a [`Document`] and collects every name introduced by a reference
//! construct:
//!
//! | Key          | Accepted body                                      |
//! |--------------|----------------------------------------------------|
//! | `DependsOn`  | string, or sequence of strings                     |
//! | `Ref`        | string                                             |
//! | `Fn::GetAtt` | `"Name.Attr"`, or `[Name, Attr]`                   |
//! | `Fn::Sub`    | template string, or `[template, {var: value}]`     |
//!
//! Any other key is searched recursively. Bodies with an unexpected shape are
//! reported to the [`DiagnosticSink`] and skipped.
//!
//! The walk uses an explicit work-list, so deeply nested documents cannot
//! exhaust the call stack.

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::model::{Document, Mapping};
use regex::Regex;
use std::sync::LazyLock;

pub const DEPENDS_ON: &str = "DependsOn";
pub const REF: &str = "Ref";
pub const GET_ATT: &str = "Fn::GetAtt";
pub const SUB: &str = "Fn::Sub";

static SUB_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)\}").expect("static regex"));

/// Extract referenced names, logging malformed constructs via `tracing`.
#[must_use]
pub fn extract_references(doc: &Document) -> Vec<String> {
    extract_references_with(doc, &mut TracingSink)
}

/// Extract referenced names, reporting malformed constructs to `sink`.
///
/// Names are returned in a stable traversal order and may repeat. A
/// `GetAtt`/`Sub` attribute suffix is already stripped.
pub fn extract_references_with(doc: &Document, sink: &mut dyn DiagnosticSink) -> Vec<String> {
    let mut refs = Vec::new();
    let mut pending: Vec<&Document> = vec![doc];

    while let Some(node) = pending.pop() {
        match node {
            Document::Scalar(_) => {}
            Document::Sequence(items) => pending.extend(items.iter().rev()),
            Document::Mapping(map) => {
                let mut nested = Vec::new();
                for (key, value) in map {
                    match key.as_str() {
                        DEPENDS_ON => depends_on(value, &mut refs, sink),
                        REF => reference(value, &mut refs, sink),
                        GET_ATT => get_att(value, &mut refs, sink),
                        SUB => sub(value, &mut refs, &mut nested, sink),
                        _ => {
                            if !value.is_scalar() {
                                nested.push(value);
                            }
                        }
                    }
                }
                pending.extend(nested.into_iter().rev());
            }
        }
    }

    refs
}

fn depends_on(value: &Document, refs: &mut Vec<String>, sink: &mut dyn DiagnosticSink) {
    match value {
        Document::Sequence(items) => {
            for item in items {
                match item.as_str() {
                    Some(name) => refs.push(name.to_string()),
                    None => sink.report(Diagnostic::malformed(
                        DEPENDS_ON,
                        format!("expected a resource name, found {}", item.kind()),
                    )),
                }
            }
        }
        other => match other.as_str() {
            Some(name) => refs.push(name.to_string()),
            None => sink.report(Diagnostic::malformed(
                DEPENDS_ON,
                format!("expected a string or sequence, found {}", other.kind()),
            )),
        },
    }
}

fn reference(value: &Document, refs: &mut Vec<String>, sink: &mut dyn DiagnosticSink) {
    match value.as_str() {
        Some(name) => refs.push(name.to_string()),
        None => sink.report(Diagnostic::malformed(
            REF,
            format!("expected a string, found {}", value.kind()),
        )),
    }
}

fn get_att(value: &Document, refs: &mut Vec<String>, sink: &mut dyn DiagnosticSink) {
    match value {
        Document::Sequence(parts) if parts.len() == 2 => match parts[0].as_str() {
            Some(name) => refs.push(name.to_string()),
            None => sink.report(Diagnostic::malformed(
                GET_ATT,
                format!("resource name must be a string, found {}", parts[0].kind()),
            )),
        },
        Document::Sequence(parts) => sink.report(Diagnostic::malformed(
            GET_ATT,
            format!("expected 2 elements, found {}", parts.len()),
        )),
        other => match other.as_str() {
            Some(target) => refs.push(strip_attribute(target).to_string()),
            None => sink.report(Diagnostic::malformed(
                GET_ATT,
                format!("expected a string or sequence, found {}", other.kind()),
            )),
        },
    }
}

fn sub<'a>(
    value: &'a Document,
    refs: &mut Vec<String>,
    nested: &mut Vec<&'a Document>,
    sink: &mut dyn DiagnosticSink,
) {
    match value {
        Document::Sequence(parts) if parts.len() == 2 => match (&parts[0], &parts[1]) {
            (Document::Scalar(_), Document::Mapping(vars)) => nested.extend(variable_values(vars)),
            (_, other) => sink.report(Diagnostic::malformed(
                SUB,
                format!("variables must be a mapping, found {}", other.kind()),
            )),
        },
        Document::Sequence(parts) => sink.report(Diagnostic::malformed(
            SUB,
            format!("expected 2 elements, found {}", parts.len()),
        )),
        other => match other.as_str() {
            Some(template) => refs.extend(sub_placeholders(template)),
            None => sink.report(Diagnostic::malformed(
                SUB,
                format!("expected a string or sequence, found {}", other.kind()),
            )),
        },
    }
}

// Variable names are local to the Sub, only their values can reference entities.
fn variable_values(vars: &Mapping) -> impl Iterator<Item = &Document> {
    vars.values().filter(|value| !value.is_scalar())
}

/// Names referenced by `${...}` placeholders in a `Fn::Sub` template.
///
/// `${!Literal}` is an escaped literal and yields nothing. `${Name.Attr}`
/// yields `Name`.
#[must_use]
pub fn sub_placeholders(template: &str) -> Vec<String> {
    SUB_PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty() && !name.starts_with('!'))
        .map(|name| strip_attribute(name).to_string())
        .collect()
}

/// Drop an attribute suffix: `"Bucket.Arn"` becomes `"Bucket"`.
#[must_use]
pub fn strip_attribute(name: &str) -> &str {
    name.split_once('.').map_or(name, |(head, _)| head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn refs(value: serde_json::Value) -> Vec<String> {
        let mut sink: Vec<Diagnostic> = Vec::new();
        extract_references_with(&Document::from(value), &mut sink)
    }

    fn refs_and_diagnostics(value: serde_json::Value) -> (Vec<String>, Vec<Diagnostic>) {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let found = extract_references_with(&Document::from(value), &mut sink);
        (found, sink)
    }

    #[test]
    fn test_ref() {
        assert_eq!(refs(json!({"Ref": "Name"})), vec!["Name"]);
    }

    #[test]
    fn test_depends_on_forms() {
        assert_eq!(refs(json!({"DependsOn": "A"})), vec!["A"]);
        assert_eq!(refs(json!({"DependsOn": ["A", "B"]})), vec!["A", "B"]);
    }

    #[test]
    fn test_get_att_forms() {
        assert_eq!(refs(json!({"Fn::GetAtt": "Bucket.Arn"})), vec!["Bucket"]);
        assert_eq!(refs(json!({"Fn::GetAtt": ["Bucket", "Arn"]})), vec!["Bucket"]);
    }

    #[test]
    fn test_sub_string() {
        let found = refs(json!({
            "Fn::Sub": "arn:${AWS::Partition}:s3:::${Bucket}/${Role.Arn}/${!Literal}"
        }));
        assert_eq!(found, vec!["AWS::Partition", "Bucket", "Role"]);
    }

    #[test]
    fn test_sub_single_character_name() {
        assert_eq!(refs(json!({"Fn::Sub": "${A}-${B}"})), vec!["A", "B"]);
    }

    #[test]
    fn test_escaped_sub_literal_yields_nothing() {
        assert!(refs(json!({"Fn::Sub": "${!Literal}"})).is_empty());
    }

    #[test]
    fn test_sub_with_variables() {
        let found = refs(json!({
            "Fn::Sub": [
                "${Local}-${Other}",
                {"Local": {"Ref": "Param"}, "Plain": "text"}
            ]
        }));
        // Variable keys are never references
        assert_eq!(found, vec!["Param"]);
    }

    #[test]
    fn test_nested_search() {
        let found = refs(json!({
            "Type": "AWS::S3::Bucket",
            "Properties": {
                "BucketName": {"Ref": "Name"},
                "Tags": [
                    {"Key": "k", "Value": {"Fn::GetAtt": ["Role", "Arn"]}},
                    "scalar"
                ]
            },
            "DependsOn": "Queue"
        }));
        assert_eq!(found, vec!["Queue", "Name", "Role"]);
    }

    #[test]
    fn test_repeated_names_are_kept() {
        let found = refs(json!([{"Ref": "A"}, {"Ref": "A"}]));
        assert_eq!(found, vec!["A", "A"]);
    }

    #[test]
    fn test_scalar_yields_nothing() {
        assert!(refs(json!("Ref")).is_empty());
    }

    #[test]
    fn test_malformed_shapes_are_reported() {
        let (found, diagnostics) = refs_and_diagnostics(json!({
            "A": {"DependsOn": 42},
            "B": {"Ref": ["x"]},
            "C": {"Fn::GetAtt": ["Only"]},
            "D": {"Fn::Sub": ["${X}", "not-a-map"]},
            "E": {"Ref": "Good"}
        }));
        assert_eq!(found, vec!["Good"]);
        assert_eq!(diagnostics.len(), 4);
        assert!(diagnostics.iter().all(|d| !d.is_unresolved()));
    }

    #[test]
    fn test_determinism() {
        let doc = Document::from(json!({
            "X": {"Ref": "A"},
            "Y": [{"Fn::Sub": "${B}"}, {"DependsOn": ["C", "D"]}]
        }));
        let first = extract_references(&doc);
        let second = extract_references(&doc);
        assert_eq!(first, second);
    }

    #[test]
    fn test_strip_attribute() {
        assert_eq!(strip_attribute("Bucket.Arn"), "Bucket");
        assert_eq!(strip_attribute("Bucket.Endpoint.Address"), "Bucket");
        assert_eq!(strip_attribute("AWS::Region"), "AWS::Region");
    }
}
