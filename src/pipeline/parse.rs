//! Template parsing stage.

use crate::model::Document;
use crate::parsers::{TemplateParser, MAX_TEMPLATE_FILE_SIZE};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// A parsed template together with where it came from
#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    /// The parsed document tree
    pub document: Document,
    /// Original file content
    pub raw_content: String,
    /// Source path
    pub path: PathBuf,
}

impl ParsedTemplate {
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    /// Consume and return the document
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Parse a template with the standard tag table
pub fn parse_template_with_context(path: &Path, quiet: bool) -> Result<ParsedTemplate> {
    parse_template_with_parser(path, &TemplateParser::default(), quiet)
}

/// Parse a template with a configured parser, adding the path to any error
pub fn parse_template_with_parser(
    path: &Path,
    parser: &TemplateParser,
    quiet: bool,
) -> Result<ParsedTemplate> {
    if !quiet {
        tracing::info!("Parsing template: {}", path.display());
    }

    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read template file: {}", path.display()))?;
    if metadata.len() > MAX_TEMPLATE_FILE_SIZE {
        bail!(
            "Template {} is {} MB, exceeding the {} MB limit",
            path.display(),
            metadata.len() / (1024 * 1024),
            MAX_TEMPLATE_FILE_SIZE / (1024 * 1024)
        );
    }

    let raw_content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template file: {}", path.display()))?;
    let document = parser
        .parse_str(&raw_content)
        .with_context(|| format!("Failed to parse template: {}", path.display()))?;

    if !quiet {
        let sections = document.as_mapping().map_or(0, indexmap::IndexMap::len);
        tracing::info!("Parsed {} top-level sections", sections);
    }

    Ok(ParsedTemplate {
        document,
        raw_content,
        path: path.to_path_buf(),
    })
}
