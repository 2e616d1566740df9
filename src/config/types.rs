//! Configuration types for cfn-tools operations.
//!
//! Provides structured configuration for the tree and diff commands.

use crate::graph::{GraphBuilder, DEFAULT_BUILTIN_PREFIX};
use crate::parsers::{TagTable, TemplateParser};
use crate::reports::{DiffFormat, GraphFormat, ReportConfig};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Output configuration (file, colors)
    pub output: OutputConfig,
    /// Dependency graph construction
    pub graph: GraphConfig,
    /// Template parsing
    pub parser: ParserConfig,
    /// Defaults for the `tree` command
    pub tree: TreeConfig,
    /// Defaults for the `diff` command
    pub diff: DiffConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Template parser with the standard tags plus any configured extras.
    #[must_use]
    pub fn template_parser(&self) -> TemplateParser {
        let mut tags = TagTable::cloudformation();
        for (tag, key) in &self.parser.extra_tags {
            tags.insert(tag.clone(), key.clone());
        }
        TemplateParser::new(tags).normalize_get_att(self.parser.normalize_get_att)
    }

    /// Graph builder honouring the configured built-in prefix.
    #[must_use]
    pub fn graph_builder(&self) -> GraphBuilder {
        GraphBuilder::new().builtin_prefix(self.graph.builtin_prefix.clone())
    }

    /// Report options for the tree command.
    #[must_use]
    pub fn tree_report_config(&self, use_color: bool) -> ReportConfig {
        ReportConfig {
            use_color,
            show_all: self.tree.all,
            show_used_by: self.tree.both,
            show_unchanged: false,
        }
    }

    /// Report options for the diff command.
    #[must_use]
    pub fn diff_report_config(&self, use_color: bool) -> ReportConfig {
        ReportConfig {
            use_color,
            show_all: false,
            show_used_by: false,
            show_unchanged: self.diff.long,
        }
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Set the prefix of names treated as built-in parameters.
    pub fn builtin_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.graph.builtin_prefix = prefix.into();
        self
    }

    /// Map an additional YAML tag to an intrinsic function key.
    pub fn extra_tag(mut self, tag: impl Into<String>, key: impl Into<String>) -> Self {
        self.config.parser.extra_tags.insert(tag.into(), key.into());
        self
    }

    /// Split dotted `!GetAtt` strings into name and attribute.
    pub const fn normalize_get_att(mut self, enabled: bool) -> Self {
        self.config.parser.normalize_get_att = enabled;
        self
    }

    /// Include entities without links in the tree.
    pub const fn tree_all(mut self, all: bool) -> Self {
        self.config.tree.all = all;
        self
    }

    /// Show dependents as well as dependencies in the tree.
    pub const fn tree_both(mut self, both: bool) -> Self {
        self.config.tree.both = both;
        self
    }

    /// Set the tree output format.
    pub const fn tree_format(mut self, format: GraphFormat) -> Self {
        self.config.tree.format = format;
        self
    }

    /// Show unchanged entries in diffs.
    pub const fn diff_long(mut self, long: bool) -> Self {
        self.config.diff.long = long;
        self
    }

    /// Set the diff output format.
    pub const fn diff_format(mut self, format: DiffFormat) -> Self {
        self.config.diff.format = format;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.diff.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Dependency graph configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GraphConfig {
    /// Unresolved references starting with this prefix become parameters
    pub builtin_prefix: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            builtin_prefix: DEFAULT_BUILTIN_PREFIX.to_string(),
        }
    }
}

/// Template parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ParserConfig {
    /// Additional tags, e.g. `"!MyMacro": "Fn::MyMacro"`
    pub extra_tags: BTreeMap<String, String>,
    /// Split `!GetAtt Name.Attr` into `[Name, Attr]`
    pub normalize_get_att: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            extra_tags: BTreeMap::new(),
            normalize_get_att: true,
        }
    }
}

/// Defaults for the `tree` command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TreeConfig {
    /// Include entities without any links
    pub all: bool,
    /// Show dependents as well as dependencies
    pub both: bool,
    /// Output format
    pub format: GraphFormat,
}

/// Defaults for the `diff` command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffConfig {
    /// Show unchanged entries and removed values
    pub long: bool,
    /// Output format
    pub format: DiffFormat,
    /// Exit with code 1 if any changes are detected
    pub fail_on_change: bool,
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Suppress non-essential output
    pub quiet: bool,
}
