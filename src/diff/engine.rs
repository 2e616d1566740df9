//! Structural comparison of documents.

use super::result::DiffNode;
use crate::model::{Document, Mapping};
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Compare two documents.
///
/// Values of different shapes are a `Changed` leaf holding `new`. Equal
/// values are an `Unchanged` leaf. Unequal sequences are compared index by
/// index and unequal mappings key by key. Comparison never fails.
///
/// Recursion depth follows the nesting depth of the inputs, which the parser
/// already bounds.
#[must_use]
pub fn compare(old: &Document, new: &Document) -> DiffNode {
    if old == new {
        return DiffNode::unchanged(new.clone());
    }

    match (old, new) {
        (Document::Sequence(old_items), Document::Sequence(new_items)) => {
            compare_sequences(old_items, new_items)
        }
        (Document::Mapping(old_map), Document::Mapping(new_map)) => {
            compare_mappings(old_map, new_map)
        }
        _ => DiffNode::changed(new.clone()),
    }
}

fn compare_sequences(old: &[Document], new: &[Document]) -> DiffNode {
    let mut items: Vec<DiffNode> = old.iter().zip(new).map(|(o, n)| compare(o, n)).collect();
    // At most one of these tails is non-empty
    items.extend(new.iter().skip(old.len()).cloned().map(DiffNode::added));
    items.extend(old.iter().skip(new.len()).cloned().map(DiffNode::removed));
    DiffNode::Sequence { items }
}

fn compare_mappings(old: &Mapping, new: &Mapping) -> DiffNode {
    let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
    let mut entries = IndexMap::with_capacity(keys.len());

    for key in keys {
        let node = match (old.get(key.as_str()), new.get(key.as_str())) {
            (Some(o), Some(n)) => compare(o, n),
            (None, Some(n)) => DiffNode::added(n.clone()),
            (Some(o), None) => DiffNode::removed(o.clone()),
            (None, None) => continue,
        };
        entries.insert(key.clone(), node);
    }

    DiffNode::Mapping { entries }
}

/// Compare two parsed templates, logging a summary of the result.
#[must_use]
pub fn compare_templates(old: &Document, new: &Document) -> DiffNode {
    let diff = compare(old, new);
    tracing::debug!("Template comparison: {}", diff.summary());
    diff
}
