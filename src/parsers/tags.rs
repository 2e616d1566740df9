//! Intrinsic function tag table.
//!
//! YAML templates may use short-form tags (`!Ref Foo`, `!GetAtt Bucket.Arn`).
//! The parser rewrites a tagged node into a one-entry mapping keyed by the
//! canonical function name. The table is built by the caller and handed to
//! the parser, so different callers can use different tag sets.

use std::collections::BTreeMap;

/// Short-form tags understood by CloudFormation and their canonical keys.
const CLOUDFORMATION_TAGS: &[(&str, &str)] = &[
    ("And", "Fn::And"),
    ("Base64", "Fn::Base64"),
    ("Cidr", "Fn::Cidr"),
    ("Condition", "Condition"),
    ("Equals", "Fn::Equals"),
    ("FindInMap", "Fn::FindInMap"),
    ("GetAZs", "Fn::GetAZs"),
    ("GetAtt", "Fn::GetAtt"),
    ("If", "Fn::If"),
    ("ImportValue", "Fn::ImportValue"),
    ("Join", "Fn::Join"),
    ("Not", "Fn::Not"),
    ("Or", "Fn::Or"),
    ("Ref", "Ref"),
    ("Select", "Fn::Select"),
    ("Split", "Fn::Split"),
    ("Sub", "Fn::Sub"),
    ("Transform", "Fn::Transform"),
];

/// Mapping from tag name (without the leading `!`) to canonical key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTable {
    entries: BTreeMap<String, String>,
}

impl TagTable {
    /// A table with no entries. Every tag is treated as unknown.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The standard CloudFormation intrinsic function tags.
    #[must_use]
    pub fn cloudformation() -> Self {
        let mut table = Self::empty();
        for (tag, key) in CLOUDFORMATION_TAGS {
            table.insert(*tag, *key);
        }
        table
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, tag: impl Into<String>, canonical_key: impl Into<String>) {
        let tag = tag.into();
        let tag = tag.trim_start_matches('!').to_string();
        self.entries.insert(tag, canonical_key.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, tag: impl Into<String>, canonical_key: impl Into<String>) -> Self {
        self.insert(tag, canonical_key);
        self
    }

    /// Canonical key for a tag. A leading `!` on the tag is ignored.
    #[must_use]
    pub fn canonical_key(&self, tag: &str) -> Option<&str> {
        self.entries
            .get(tag.trim_start_matches('!'))
            .map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(tag, canonical_key)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for TagTable {
    fn default() -> Self {
        Self::cloudformation()
    }
}
