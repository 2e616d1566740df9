//! Top-level template entities.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The top-level template section an entity is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Parameters,
    Resources,
    Outputs,
}

impl Category {
    /// All categories, in report order.
    pub const ALL: [Self; 3] = [Self::Parameters, Self::Resources, Self::Outputs];

    /// Section name as it appears in a template
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Parameters => "Parameters",
            Self::Resources => "Resources",
            Self::Outputs => "Outputs",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Parameters" => Ok(Self::Parameters),
            "Resources" => Ok(Self::Resources),
            "Outputs" => Ok(Self::Outputs),
            other => Err(format!("unknown template section '{other}'")),
        }
    }
}

/// A named element of a template, identified by its section and name.
///
/// Ordering follows the `"category/name"` string form. No section name is a
/// prefix of another, so comparing the section names and then the entity
/// names gives the same result without allocating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub category: Category,
    pub name: String,
}

impl Entity {
    pub fn new(category: Category, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
        }
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Self::new(Category::Parameters, name)
    }

    pub fn resource(name: impl Into<String>) -> Self {
        Self::new(Category::Resources, name)
    }

    pub fn output(name: impl Into<String>) -> Self {
        Self::new(Category::Outputs, name)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

impl Ord for Entity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .as_str()
            .cmp(other.category.as_str())
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for Entity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Entity::resource("Bucket").to_string(), "Resources/Bucket");
        assert_eq!(
            Entity::parameter("AWS::Region").to_string(),
            "Parameters/AWS::Region"
        );
    }

    #[test]
    fn test_ordering_matches_string_form() {
        let mut entities = vec![
            Entity::resource("Bucket"),
            Entity::output("Arn"),
            Entity::parameter("Name"),
            Entity::parameter("AWS::AccountId"),
            Entity::resource("A"),
        ];
        let mut by_string = entities.clone();
        by_string.sort_by_key(ToString::to_string);
        entities.sort();

        assert_eq!(entities, by_string);
        assert_eq!(entities[0], Entity::output("Arn"));
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Outputs".parse::<Category>(), Ok(Category::Outputs));
        assert!("Mappings".parse::<Category>().is_err());
    }
}
