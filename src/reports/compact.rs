//! Compact text form of document values.

use crate::model::Document;

/// Render a value as a deterministic YAML block without a trailing newline.
///
/// Mapping keys are sorted. Scalars render on a single line where YAML
/// allows it.
#[must_use]
pub fn compact(value: &Document) -> String {
    match serde_yaml::to_string(value) {
        Ok(text) => text.trim_end().to_string(),
        Err(e) => {
            tracing::warn!("Falling back to JSON for value that YAML could not encode: {e}");
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(compact(&Document::from("quux")), "quux");
        assert_eq!(compact(&Document::from(4_i64)), "4");
        assert_eq!(compact(&Document::from(true)), "true");
    }

    #[test]
    fn test_mapping_keys_sorted() {
        let doc = Document::from(json!({"zeta": "z", "alpha": "a"}));
        assert_eq!(compact(&doc), "alpha: a\nzeta: z");
    }

    #[test]
    fn test_sequence() {
        let doc = Document::from(json!(["a", "b"]));
        assert_eq!(compact(&doc), "- a\n- b");
    }
}
