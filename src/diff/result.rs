//! Difference tree types.

use crate::model::Document;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Classification of a difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Added,
    Removed,
    Changed,
    Unchanged,
}

impl ChangeType {
    /// Four-character line marker used by the text renderer.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Added => ">>> ",
            Self::Removed => "<<< ",
            Self::Changed => "||| ",
            Self::Unchanged => "=== ",
        }
    }

    /// Combine child tags into a parent tag.
    ///
    /// Unchanged children are ignored. If every remaining child carries the
    /// same tag that tag wins, otherwise the result is `Changed`. No children,
    /// or only unchanged ones, give `Unchanged`.
    pub fn aggregate(tags: impl IntoIterator<Item = Self>) -> Self {
        let mut result = Self::Unchanged;
        for tag in tags {
            if tag == Self::Unchanged {
                continue;
            }
            result = match result {
                Self::Unchanged => tag,
                current if current == tag => current,
                _ => return Self::Changed,
            };
        }
        result
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Removed => write!(f, "removed"),
            Self::Changed => write!(f, "changed"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// A node of the difference tree.
///
/// Leaves carry a value for every tag: the new value when `Added` or
/// `Changed`, the old value when `Removed`, and the shared value when
/// `Unchanged`. Sequence and mapping nodes carry no tag of their own; see
/// [`change_type`](Self::change_type).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum DiffNode {
    Leaf { value: Document, change: ChangeType },
    /// Index-aligned to the longer of the two compared sequences
    Sequence { items: Vec<DiffNode> },
    /// Union of both mappings' keys, sorted
    Mapping { entries: IndexMap<String, DiffNode> },
}

impl DiffNode {
    pub const fn leaf(value: Document, change: ChangeType) -> Self {
        Self::Leaf { value, change }
    }

    pub const fn added(value: Document) -> Self {
        Self::leaf(value, ChangeType::Added)
    }

    pub const fn removed(value: Document) -> Self {
        Self::leaf(value, ChangeType::Removed)
    }

    pub const fn changed(value: Document) -> Self {
        Self::leaf(value, ChangeType::Changed)
    }

    pub const fn unchanged(value: Document) -> Self {
        Self::leaf(value, ChangeType::Unchanged)
    }

    /// The tag of a leaf, or the aggregate of a node's children.
    #[must_use]
    pub fn change_type(&self) -> ChangeType {
        match self {
            Self::Leaf { change, .. } => *change,
            Self::Sequence { items } => ChangeType::aggregate(items.iter().map(Self::change_type)),
            Self::Mapping { entries } => {
                ChangeType::aggregate(entries.values().map(Self::change_type))
            }
        }
    }

    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.change_type() == ChangeType::Unchanged
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// The value carried by a leaf.
    #[must_use]
    pub const fn value(&self) -> Option<&Document> {
        match self {
            Self::Leaf { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Count leaves by tag.
    #[must_use]
    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary::default();
        let mut pending = vec![self];

        while let Some(node) = pending.pop() {
            match node {
                Self::Leaf { change, .. } => summary.record(*change),
                Self::Sequence { items } => pending.extend(items),
                Self::Mapping { entries } => pending.extend(entries.values()),
            }
        }

        summary
    }
}

/// Leaf counts of a difference tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    fn record(&mut self, change: ChangeType) {
        match change {
            ChangeType::Added => self.added += 1,
            ChangeType::Removed => self.removed += 1,
            ChangeType::Changed => self.changed += 1,
            ChangeType::Unchanged => self.unchanged += 1,
        }
    }

    /// Number of leaves that are not unchanged.
    #[must_use]
    pub const fn total_changes(&self) -> usize {
        self.added + self.removed + self.changed
    }

    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.total_changes() > 0
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} removed, {} changed",
            self.added, self.removed, self.changed
        )
    }
}
