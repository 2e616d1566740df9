//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two templates.

use crate::config::AppConfig;
use crate::diff::{compare_templates, DiffNode};
use crate::pipeline::{
    exit_codes, parse_template_with_parser, should_use_color, write_output, OutputTarget,
    PipelineError,
};
use crate::reports::create_diff_reporter;
use anyhow::Result;
use std::path::Path;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_diff(old: &Path, new: &Path, config: &AppConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;
    let parser = config.template_parser();

    let parse = |path: &Path| {
        parse_template_with_parser(path, &parser, quiet).map_err(|source| {
            PipelineError::ParseFailed {
                path: path.display().to_string(),
                source,
            }
        })
    };
    let old_parsed = parse(old)?;
    let new_parsed = parse(new)?;

    let diff = compare_templates(old_parsed.document(), new_parsed.document());
    let summary = diff.summary();
    if !quiet {
        tracing::info!("Templates compared: {}", summary);
    }

    let exit_code = determine_exit_code(config, &diff);

    let target = OutputTarget::from_option(config.output.file.clone());
    let use_color = should_use_color(config.output.no_color, &target);
    let reporter = create_diff_reporter(config.diff.format, &config.diff_report_config(use_color));
    let report = reporter
        .generate(&diff)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;
    write_output(&report, &target, quiet)?;

    Ok(exit_code)
}

/// Determine the exit code from the diff and the fail-on-change flag.
fn determine_exit_code(config: &AppConfig, diff: &DiffNode) -> i32 {
    if config.diff.fail_on_change && !diff.is_unchanged() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
