//! Configuration validation for cfn-tools.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, GraphConfig, OutputConfig, ParserConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.output.validate());
        errors.extend(self.graph.validate());
        errors.extend(self.parser.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_ref().and_then(|f| f.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }

        errors
    }
}

impl Validatable for GraphConfig {
    fn validate(&self) -> Vec<ConfigError> {
        if self.builtin_prefix.trim().is_empty() {
            return vec![ConfigError::new(
                "graph.builtin_prefix",
                "Prefix must not be empty; every unresolved reference would become a parameter",
            )];
        }
        Vec::new()
    }
}

impl Validatable for ParserConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (tag, key) in &self.extra_tags {
            let name = tag.trim_start_matches('!');
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                errors.push(ConfigError::new(
                    format!("parser.extra_tags.{tag}"),
                    format!("Invalid tag name '{tag}'"),
                ));
            }
            if key.trim().is_empty() {
                errors.push(ConfigError::new(
                    format!("parser.extra_tags.{tag}"),
                    "Canonical key must not be empty",
                ));
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_empty_builtin_prefix() {
        let config = AppConfig::builder().builtin_prefix("  ").build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "graph.builtin_prefix");
    }

    #[test]
    fn test_extra_tag_validation() {
        let config = AppConfig::builder()
            .extra_tag("!", "Fn::Empty")
            .extra_tag("!Ok", "")
            .extra_tag("!Fine", "Fn::Fine")
            .build();
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["parser.extra_tags.!", "parser.extra_tags.!Ok"]);
    }

    #[test]
    fn test_output_file_parent_must_exist() {
        let config = AppConfig::builder()
            .output_file(Some(PathBuf::from("/nonexistent/dir/report.txt")))
            .build();
        assert!(!config.is_valid());

        let config = AppConfig::builder()
            .output_file(Some(PathBuf::from("report.txt")))
            .build();
        assert!(config.is_valid());
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::new("graph.builtin_prefix", "bad");
        assert_eq!(error.to_string(), "graph.builtin_prefix: bad");
    }
}
