//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".cfn-tools.yaml",
    ".cfn-tools.yml",
    "cfn-tools.yaml",
    "cfn-tools.yml",
];

/// Directory name under the user config directory.
const CONFIG_DIR_NAME: &str = "cfn-tools";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/cfn-tools/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    search_dirs().iter().find_map(|dir| find_config_in_dir(dir))
}

/// Directories searched for a config file, in order.
#[must_use]
pub fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(git_root) = find_git_root() {
        if !dirs.contains(&git_root) {
            dirs.push(git_root);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        dirs.push(config_dir.join(CONFIG_DIR_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        dirs.push(home);
    }
    dirs
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Booleans only ever switch on and formats only override when they are
    /// not the default, so a default CLI layer leaves file settings intact.
    pub fn merge(&mut self, other: &Self) {
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        self.output.no_color |= other.output.no_color;

        if other.graph != super::types::GraphConfig::default() {
            self.graph.clone_from(&other.graph);
        }

        for (tag, key) in &other.parser.extra_tags {
            self.parser.extra_tags.insert(tag.clone(), key.clone());
        }
        if !other.parser.normalize_get_att {
            self.parser.normalize_get_att = false;
        }

        self.tree.all |= other.tree.all;
        self.tree.both |= other.tree.both;
        if other.tree.format != crate::reports::GraphFormat::default() {
            self.tree.format = other.tree.format;
        }

        self.diff.long |= other.diff.long;
        self.diff.fail_on_change |= other.diff.fail_on_change;
        if other.diff.format != crate::reports::DiffFormat::default() {
            self.diff.format = other.diff.format;
        }

        self.behavior.quiet |= other.behavior.quiet;
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r#"# cfn-tools configuration
#
# Place this file at:
#   - .cfn-tools.yaml in your project root
#   - ~/.config/cfn-tools/cfn-tools.yaml for global config
#
# CLI arguments always override file settings.

# Output configuration
output:
  # Output file path (omit for stdout)
  # file: report.txt
  # Disable colored output
  no_color: false

# Dependency graph
graph:
  # Unresolved references with this prefix become parameters
  builtin_prefix: "AWS::"

# Template parsing
parser:
  # Extra YAML tags mapped to intrinsic function keys
  extra_tags: {}
  #   "!MyMacro": "Fn::MyMacro"
  # Split "!GetAtt Name.Attr" into [Name, Attr]
  normalize_get_att: true

# tree command
tree:
  # Include entities without links
  all: false
  # Show UsedBy as well as DependsOn
  both: false
  # Format: text, dot, json
  format: text

# diff command
diff:
  # Show unchanged entries
  long: false
  # Format: text, json
  format: text
  # Exit with code 1 if any changes detected
  fail_on_change: false

# Behavior flags
behavior:
  # Suppress non-essential output
  quiet: false
"#
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
