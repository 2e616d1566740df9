//! Configuration module for cfn-tools.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use cfn_tools::config::AppConfig;
//!
//! let config = AppConfig::builder()
//!     .tree_all(true)
//!     .fail_on_change(true)
//!     .build();
//! assert!(config.tree.all);
//! ```
//!
//! # Configuration File
//!
//! Place a `.cfn-tools.yaml` file in your project root or `~/.config/cfn-tools/`:
//!
//! ```yaml
//! parser:
//!   extra_tags:
//!     "!MyMacro": "Fn::MyMacro"
//! diff:
//!   fail_on_change: true
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, GraphConfig, OutputConfig,
    ParserConfig, TreeConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    search_dirs, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// The schema documents every option accepted in `.cfn-tools.yaml`, for
/// editor validation and autocompletion.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        for section in ["output", "graph", "parser", "tree", "diff", "behavior"] {
            assert!(schema.contains(&format!("\"{section}\"")), "{section}");
        }
        assert!(schema.contains("builtin_prefix"));
    }
}
