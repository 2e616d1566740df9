//! Tree command handler.
//!
//! Implements the `tree` subcommand: dependency graph of a single template.

use crate::config::AppConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::pipeline::{
    exit_codes, parse_template_with_parser, should_use_color, write_output, OutputTarget,
    PipelineError,
};
use crate::reports::create_graph_reporter_with_config;
use anyhow::Result;
use std::path::Path;

/// Run the tree command, returning the desired exit code.
pub fn run_tree(template: &Path, config: &AppConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;
    let parsed = parse_template_with_parser(template, &config.template_parser(), quiet)
        .map_err(|source| PipelineError::ParseFailed {
            path: template.display().to_string(),
            source,
        })?;

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let graph = config
        .graph_builder()
        .build(parsed.document(), &mut diagnostics)
        .map_err(|e| PipelineError::GraphFailed { source: e.into() })?;

    let unresolved = diagnostics.iter().filter(|d| d.is_unresolved()).count();
    let mut log = TracingSink;
    for diagnostic in diagnostics {
        log.report(diagnostic);
    }
    if !quiet {
        tracing::info!(
            "Graph has {} entities and {} links ({} unresolved references)",
            graph.len(),
            graph.edge_count(),
            unresolved
        );
    }

    let target = OutputTarget::from_option(config.output.file.clone());
    let use_color = should_use_color(config.output.no_color, &target);
    let reporter =
        create_graph_reporter_with_config(config.tree.format, &config.tree_report_config(use_color));
    let report = reporter
        .generate(&graph)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;
    write_output(&report, &target, quiet)?;

    Ok(exit_codes::SUCCESS)
}
