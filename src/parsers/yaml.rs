//! YAML/JSON template parser.
//!
//! JSON is a subset of the YAML grammar the parser accepts, so both template
//! formats go through the same path.

use super::tags::TagTable;
use crate::error::{CfnToolsError, ErrorContext, ParseErrorKind, Result};
use crate::model::{Document, Mapping, Scalar};
use serde_yaml::Value;
use std::path::Path;

const GET_ATT: &str = "Fn::GetAtt";

/// Parser that turns template text into a [`Document`].
#[derive(Debug, Clone)]
pub struct TemplateParser {
    tags: TagTable,
    normalize_get_att: bool,
}

impl TemplateParser {
    /// Create a parser with the given tag table.
    #[must_use]
    pub const fn new(tags: TagTable) -> Self {
        Self {
            tags,
            normalize_get_att: true,
        }
    }

    /// Rewrite `Fn::GetAtt: "Name.Attr"` into `["Name", "Attr"]` (default on).
    #[must_use]
    pub const fn normalize_get_att(mut self, enabled: bool) -> Self {
        self.normalize_get_att = enabled;
        self
    }

    #[must_use]
    pub const fn tags(&self) -> &TagTable {
        &self.tags
    }

    /// Parse template text.
    pub fn parse_str(&self, content: &str) -> Result<Document> {
        let value: Value = serde_yaml::from_str(content)?;
        self.convert(value)
    }

    /// Read and parse a template file.
    pub fn parse_file(&self, path: &Path) -> Result<Document> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CfnToolsError::io(path, e))?;
        self.parse_str(&content)
            .with_context(|| format!("{}", path.display()))
    }

    fn convert(&self, value: Value) -> Result<Document> {
        Ok(match value {
            Value::Null => Document::null(),
            Value::Bool(b) => Document::Scalar(Scalar::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Document::Scalar(Scalar::Int(i)),
                None => Document::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::String(s) => Document::string(s),
            Value::Sequence(items) => Document::Sequence(
                items
                    .into_iter()
                    .map(|item| self.convert(item))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Mapping(entries) => {
                let mut map = Mapping::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(mapping_key(key)?, self.convert(value)?);
                }
                self.normalize(map)
            }
            Value::Tagged(tagged) => {
                let raw_tag = tagged.tag.to_string();
                let tag = raw_tag.trim_start_matches('!');
                let body = self.convert(tagged.value)?;

                match self.tags.canonical_key(tag) {
                    Some(key) => {
                        // Intrinsic functions never take a null argument
                        let body = match body {
                            Document::Scalar(Scalar::Null) => Document::string(""),
                            other => other,
                        };
                        let mut map = Mapping::with_capacity(1);
                        map.insert(key.to_string(), body);
                        self.normalize(map)
                    }
                    None => {
                        tracing::warn!("Unknown tag '!{}' left as plain value", tag);
                        body
                    }
                }
            }
        })
    }

    fn normalize(&self, mut map: Mapping) -> Document {
        if self.normalize_get_att && map.len() == 1 {
            if let Some(Document::Scalar(Scalar::String(target))) = map.get(GET_ATT) {
                if let Some((name, attribute)) = target.split_once('.') {
                    let parts = vec![Document::string(name), Document::string(attribute)];
                    map.insert(GET_ATT.to_string(), Document::Sequence(parts));
                }
            }
        }
        Document::Mapping(map)
    }
}

impl Default for TemplateParser {
    fn default() -> Self {
        Self::new(TagTable::cloudformation())
    }
}

fn mapping_key(key: Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Sequence(_) => Err(non_scalar_key("sequence")),
        Value::Mapping(_) => Err(non_scalar_key("mapping")),
        Value::Tagged(tagged) => Err(non_scalar_key(&format!("tagged value {}", tagged.tag))),
    }
}

fn non_scalar_key(found: &str) -> CfnToolsError {
    CfnToolsError::parse(
        "mapping key",
        ParseErrorKind::NonScalarKey(found.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(content: &str) -> Document {
        TemplateParser::default().parse_str(content).unwrap()
    }

    #[test]
    fn test_short_form_ref() {
        let doc = parse("Value: !Ref Bucket\n");
        assert_eq!(doc, Document::from(json!({"Value": {"Ref": "Bucket"}})));
    }

    #[test]
    fn test_short_form_sub_sequence() {
        let doc = parse("Value: !Sub\n  - '${Name}-x'\n  - Name: !Ref Param\n");
        assert_eq!(
            doc,
            Document::from(json!({
                "Value": {"Fn::Sub": ["${Name}-x", {"Name": {"Ref": "Param"}}]}
            }))
        );
    }

    #[test]
    fn test_get_att_forms_are_equal() {
        let short = parse("Value: !GetAtt Bucket.Arn\n");
        let long = parse("Value:\n  Fn::GetAtt:\n    - Bucket\n    - Arn\n");
        let dotted = parse("Value:\n  Fn::GetAtt: Bucket.Arn\n");

        assert_eq!(short, long);
        assert_eq!(dotted, long);
    }

    #[test]
    fn test_get_att_normalization_can_be_disabled() {
        let doc = TemplateParser::default()
            .normalize_get_att(false)
            .parse_str("Value: !GetAtt Bucket.Arn\n")
            .unwrap();
        assert_eq!(
            doc,
            Document::from(json!({"Value": {"Fn::GetAtt": "Bucket.Arn"}}))
        );
    }

    #[test]
    fn test_null_tag_body_becomes_empty_string() {
        let doc = parse("Value: !GetAZs\n");
        assert_eq!(doc, Document::from(json!({"Value": {"Fn::GetAZs": ""}})));
    }

    #[test]
    fn test_unknown_tag_keeps_body() {
        let doc = TemplateParser::new(TagTable::empty())
            .parse_str("Value: !Ref Bucket\n")
            .unwrap();
        assert_eq!(doc, Document::from(json!({"Value": "Bucket"})));
    }

    #[test]
    fn test_json_input() {
        let doc = parse(r#"{"Resources": {"Bucket": {"Type": "AWS::S3::Bucket"}}}"#);
        assert_eq!(
            doc.get("Resources")
                .and_then(|r| r.get("Bucket"))
                .and_then(|b| b.get("Type"))
                .and_then(Document::as_str),
            Some("AWS::S3::Bucket")
        );
    }

    #[test]
    fn test_scalar_keys_are_stringified() {
        let doc = parse("1: one\ntrue: yes\n");
        let map = doc.as_mapping().unwrap();
        assert!(map.contains_key("1"));
        assert!(map.contains_key("true"));
    }

    #[test]
    fn test_non_scalar_key_is_an_error() {
        let result = TemplateParser::default().parse_str("? [a, b]\n: value\n");
        assert!(matches!(
            result,
            Err(CfnToolsError::Parse {
                source: ParseErrorKind::NonScalarKey(_),
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = TemplateParser::default().parse_str("a: [unclosed\n");
        assert!(matches!(
            result,
            Err(CfnToolsError::Parse {
                source: ParseErrorKind::InvalidYaml(_),
                ..
            })
        ));
    }
}
