//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full parse → analyse → report pipeline, error
//! handling paths, and CLI command handlers with real fixture files.

use cfn_tools::cli::{run_diff, run_tree};
use cfn_tools::config::{load_config_file, AppConfig};
use cfn_tools::pipeline::{
    exit_codes, parse_template_with_context, parse_template_with_parser, write_output,
    OutputTarget,
};
use cfn_tools::reports::{DiffFormat, GraphFormat};
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn quiet_config() -> cfn_tools::AppConfigBuilder {
    AppConfig::builder().quiet(true).no_color(true)
}

// ============================================================================
// Parse Stage Tests
// ============================================================================

mod parse_stage {
    use super::*;

    #[test]
    fn parse_yaml_fixture() {
        let parsed = parse_template_with_context(&fixture_path("bucket.yaml"), true)
            .expect("parse should succeed");

        let resources = parsed.document().get("Resources").unwrap();
        assert_eq!(resources.as_mapping().unwrap().len(), 2);
        assert!(parsed.raw_content().contains("!GetAtt Bucket.Arn"));
    }

    #[test]
    fn parse_json_fixture() {
        let parsed = parse_template_with_context(&fixture_path("unresolved.json"), true)
            .expect("JSON is valid YAML");
        assert!(parsed.document().get("Resources").is_some());
    }

    #[test]
    fn short_form_tags_are_canonicalised() {
        let parsed = parse_template_with_context(&fixture_path("bucket.yaml"), true).unwrap();
        let value = parsed
            .document()
            .get("Outputs")
            .and_then(|o| o.get("BucketArn"))
            .and_then(|b| b.get("Value"))
            .and_then(|v| v.get("Fn::GetAtt"))
            .and_then(|g| g.as_sequence())
            .unwrap();
        let parts: Vec<&str> = value.iter().filter_map(|p| p.as_str()).collect();
        assert_eq!(parts, ["Bucket", "Arn"]);
    }

    #[test]
    fn custom_parser_keeps_dotted_get_att() {
        let config = quiet_config().normalize_get_att(false).build();
        let parsed =
            parse_template_with_parser(&fixture_path("bucket.yaml"), &config.template_parser(), true)
                .unwrap();
        let value = parsed
            .document()
            .get("Outputs")
            .and_then(|o| o.get("BucketArn"))
            .and_then(|b| b.get("Value"))
            .and_then(|v| v.get("Fn::GetAtt"))
            .and_then(|g| g.as_str());
        assert_eq!(value, Some("Bucket.Arn"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = parse_template_with_context(&fixture_path("does-not-exist.yaml"), true);
        assert!(result.is_err());
    }
}

// ============================================================================
// Command Handler Tests
// ============================================================================

mod commands {
    use super::*;

    #[test]
    fn tree_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("graph.json");
        let config = quiet_config()
            .tree_format(GraphFormat::Json)
            .output_file(Some(out.clone()))
            .build();

        let code = run_tree(&fixture_path("bucket.yaml"), &config).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(value["nodes"].as_array().unwrap().len(), 5);
        assert_eq!(value["nodes"][4]["id"], "Resources/Policy");
        assert_eq!(value["edges"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn tree_tolerates_unresolved_references() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("tree.txt");
        let config = quiet_config().output_file(Some(out.clone())).build();

        let code = run_tree(&fixture_path("unresolved.json"), &config).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(
            std::fs::read_to_string(out).unwrap(),
            "Resources:\n  Queue:\n    DependsOn:\n      Resources:\n        - DeadLetter\n"
        );
    }

    #[test]
    fn diff_with_fail_on_change() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("diff.txt");
        let config = quiet_config()
            .fail_on_change(true)
            .output_file(Some(out.clone()))
            .build();

        let code = run_diff(
            &fixture_path("bucket.yaml"),
            &fixture_path("bucket-v2.yaml"),
            &config,
        )
        .unwrap();
        assert_eq!(code, exit_codes::CHANGES_DETECTED);
        assert!(std::fs::read_to_string(out)
            .unwrap()
            .starts_with("<<< Outputs\n"));
    }

    #[test]
    fn diff_identical_templates() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("diff.json");
        let config = quiet_config()
            .fail_on_change(true)
            .diff_format(DiffFormat::Json)
            .output_file(Some(out.clone()))
            .build();

        let fixture = fixture_path("bucket.yaml");
        let code = run_diff(&fixture, &fixture, &config).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(value["summary"]["added"], 0);
        assert_eq!(value["change"], "unchanged");
    }

    #[test]
    fn diff_reports_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "Resources: {unclosed\n").unwrap();

        let err = run_diff(&fixture_path("bucket.yaml"), &broken, &quiet_config().build())
            .unwrap_err();
        assert!(err.to_string().contains("broken.yaml"), "{err}");
    }
}

// ============================================================================
// Config and Output Tests
// ============================================================================

mod config_and_output {
    use super::*;

    #[test]
    fn config_file_drives_commands() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".cfn-tools.yaml");
        std::fs::write(
            &config_path,
            "tree:\n  all: true\n  format: dot\nbehavior:\n  quiet: true\n",
        )
        .unwrap();

        let mut config = load_config_file(&config_path).unwrap();
        let out = dir.path().join("graph.dot");
        config.merge(&AppConfig::builder().output_file(Some(out.clone())).build());
        assert_eq!(config.tree.format, GraphFormat::Dot);

        run_tree(&fixture_path("bucket.yaml"), &config).unwrap();
        let dot = std::fs::read_to_string(out).unwrap();
        assert!(dot.contains("\"Parameters: AWS::Partition\" [label=\"AWS::Partition\" shape=diamond];"), "{dot}");
    }

    #[test]
    fn write_output_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, "stale").unwrap();

        write_output("fresh\n", &OutputTarget::File(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "fresh\n");
    }
}
