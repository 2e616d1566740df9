//! Entity classification.

use crate::error::{CfnToolsError, GraphErrorKind, Result};
use crate::model::{Category, Document, Mapping, Scalar};
use std::collections::HashMap;

/// Map each name declared directly under `Parameters` or `Resources` to
/// its category.
///
/// Only the direct children of those two sections are classified. A name
/// declared in both ends up as a resource.
pub fn classify(document: &Document) -> Result<HashMap<String, Category>> {
    let mut names = HashMap::new();
    for category in [Category::Parameters, Category::Resources] {
        if let Some(entries) = section(document, category)? {
            for name in entries.keys() {
                names.insert(name.clone(), category);
            }
        }
    }
    Ok(names)
}

/// The entries of a top-level section.
///
/// A missing or empty (`null`) section is `None`. A section of any other
/// shape, or a document that is not a mapping, is an error.
pub fn section(document: &Document, category: Category) -> Result<Option<&Mapping>> {
    let top = document.as_mapping().ok_or_else(|| {
        CfnToolsError::graph(
            "reading template sections",
            GraphErrorKind::NotAMapping {
                found: document.kind().to_string(),
            },
        )
    })?;

    match top.get(category.as_str()) {
        None | Some(Document::Scalar(Scalar::Null)) => Ok(None),
        Some(Document::Mapping(entries)) => Ok(Some(entries)),
        Some(other) => Err(CfnToolsError::graph(
            "reading template sections",
            GraphErrorKind::MalformedSection {
                section: category.as_str().to_string(),
                found: other.kind().to_string(),
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_parameters_and_resources() {
        let doc = Document::from(json!({
            "Parameters": {"Name": {"Type": "String"}},
            "Resources": {"Bucket": {"Properties": {"Nested": {"Ref": "Name"}}}},
            "Outputs": {"Arn": {"Value": "x"}}
        }));
        let names = classify(&doc).unwrap();

        assert_eq!(names.len(), 2);
        assert_eq!(names["Name"], Category::Parameters);
        assert_eq!(names["Bucket"], Category::Resources);
        assert!(!names.contains_key("Arn"));
        assert!(!names.contains_key("Nested"));
    }

    #[test]
    fn test_missing_and_null_sections() {
        let doc = Document::from(json!({"Parameters": null}));
        assert!(classify(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_not_a_mapping() {
        let doc = Document::from(json!(["a", "b"]));
        assert!(matches!(
            classify(&doc),
            Err(CfnToolsError::Graph {
                source: GraphErrorKind::NotAMapping { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_section() {
        let doc = Document::from(json!({"Resources": ["Bucket"]}));
        match classify(&doc) {
            Err(CfnToolsError::Graph {
                source: GraphErrorKind::MalformedSection { section, found },
                ..
            }) => {
                assert_eq!(section, "Resources");
                assert_eq!(found, "sequence");
            }
            other => panic!("Expected MalformedSection, got {other:?}"),
        }
    }
}
