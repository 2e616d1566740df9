//! Template parsers.
//!
//! Converts YAML or JSON template text into the generic [`Document`] tree.
//! Short-form intrinsic function tags are resolved through an explicit
//! [`TagTable`] handed to the [`TemplateParser`].
//!
//! ## Usage
//!
//! ```no_run
//! use cfn_tools::parsers::{parse_template, TagTable, TemplateParser};
//! use std::path::Path;
//!
//! // Standard CloudFormation tags
//! let doc = parse_template(Path::new("template.yaml")).unwrap();
//!
//! // Custom tag set
//! let parser = TemplateParser::new(TagTable::cloudformation().with("Length", "Fn::Length"));
//! let doc = parser.parse_str("Value: !Length [a, b]").unwrap();
//! ```

mod tags;
mod yaml;

pub use tags::TagTable;
pub use yaml::TemplateParser;

use crate::error::{CfnToolsError, Result};
use crate::model::Document;
use std::path::Path;

/// Maximum template file size (64 MB). Real templates are far smaller, the
/// limit only guards against reading arbitrary large files into memory.
pub const MAX_TEMPLATE_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Read and parse a template with the standard CloudFormation tag table.
///
/// Returns an error if the file exceeds [`MAX_TEMPLATE_FILE_SIZE`].
pub fn parse_template(path: &Path) -> Result<Document> {
    let metadata = std::fs::metadata(path).map_err(|e| CfnToolsError::io(path, e))?;
    if metadata.len() > MAX_TEMPLATE_FILE_SIZE {
        return Err(CfnToolsError::validation(format!(
            "{} is {} MB, exceeding the {} MB template limit",
            path.display(),
            metadata.len() / (1024 * 1024),
            MAX_TEMPLATE_FILE_SIZE / (1024 * 1024),
        )));
    }
    TemplateParser::default().parse_file(path)
}

/// Parse template text with the standard CloudFormation tag table.
pub fn parse_template_str(content: &str) -> Result<Document> {
    TemplateParser::default().parse_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_template_str() {
        let doc = parse_template_str("Resources:\n  Bucket:\n    Type: AWS::S3::Bucket\n").unwrap();
        assert!(doc.get("Resources").is_some());
    }

    #[test]
    fn test_parse_template_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Parameters:\n  Name:\n    Type: String").unwrap();

        let doc = parse_template(file.path()).unwrap();
        assert!(doc.get("Parameters").and_then(|p| p.get("Name")).is_some());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = parse_template(Path::new("/nonexistent/template.yaml"));
        assert!(matches!(result, Err(CfnToolsError::Io { .. })));
    }
}
