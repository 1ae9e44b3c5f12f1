//! End-to-end tests for the `ottl-link` binary.

use std::fs;
use std::process::{Command, Output};

use ottl_playground::PlaygroundState;
use tempfile::TempDir;

fn ottl_link(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ottl-link"))
        .args(args)
        .output()
        .expect("failed to run ottl-link")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

fn write_inputs(dir: &TempDir, config: &str, payload: &str) -> (String, String) {
    let config_path = dir.path().join("config.yaml");
    let payload_path = dir.path().join("payload.json");
    fs::write(&config_path, config).unwrap();
    fs::write(&payload_path, payload).unwrap();
    (
        config_path.to_string_lossy().into_owned(),
        payload_path.to_string_lossy().into_owned(),
    )
}

#[test]
fn test_encode_produces_decodable_token() {
    let dir = TempDir::new().unwrap();
    let config = "traces:\n  span:\n    - kind == 1";
    let (config_path, payload_path) =
        write_inputs(&dir, config, "{\n  \"resourceSpans\": []\n}");

    let output = ottl_link(&["encode", &config_path, &payload_path, "-e", "filter_processor"]);
    assert!(output.status.success());

    let state = PlaygroundState::decode(&stdout(&output)).unwrap();
    assert_eq!(state.config, config);
    assert_eq!(state.evaluator, "filter_processor");
}

#[test]
fn test_encode_with_base_url() {
    let dir = TempDir::new().unwrap();
    let (config_path, payload_path) = write_inputs(&dir, "", "{}");

    let output = ottl_link(&[
        "encode",
        &config_path,
        &payload_path,
        "--base-url",
        "https://playground.example/#stale",
    ]);
    assert!(output.status.success());
    let url = stdout(&output);
    assert!(url.starts_with("https://playground.example/#"));
    assert!(!url.contains("stale"));
}

#[test]
fn test_decode_url() {
    let token = PlaygroundState {
        config: "log_statements: []".to_string(),
        ..PlaygroundState::default()
    }
    .encode();
    let url = format!("https://playground.example/#{}", token);

    let output = ottl_link(&["decode", &url]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("evaluator: transform_processor"));
    assert!(text.contains("log_statements: []"));
}

#[test]
fn test_decode_malformed_fails() {
    let output = ottl_link(&["decode", "not a token"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid share link"));
}

#[test]
fn test_classify() {
    let dir = TempDir::new().unwrap();
    let (_, payload_path) = write_inputs(&dir, "", r#"{"resourceMetrics":[]}"#);
    let output = ottl_link(&["classify", &payload_path]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "metrics");

    let (_, bad_path) = write_inputs(&dir, "", r#"{"spans":[]}"#);
    let output = ottl_link(&["classify", &bad_path]);
    assert!(!output.status.success());
}

#[test]
fn test_examples_listing() {
    let output = ottl_link(&["examples", "-e", "filter_processor"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("filter_processor:"));
    assert!(text.contains("Dropping spans"));
    assert!(!text.contains("Rename an attribute"));
}

#[test]
fn test_examples_json() {
    let output = ottl_link(&["examples", "--json"]);
    assert!(output.status.success());
    let catalog: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(catalog["transform_processor"][0]["name"], "Aggregate a metric");
    assert_eq!(catalog["filter_processor"].as_array().unwrap().len(), 3);
}

#[test]
fn test_sample_is_pretty_printed() {
    let output = ottl_link(&["sample", "traces"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("{\n  \"resourceSpans\": ["));
}
