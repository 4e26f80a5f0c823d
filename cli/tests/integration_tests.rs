use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn fde_validate(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fde-validate"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run fde-validate")
}

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("samples")
        .join("deployment.sample.yaml")
}

fn write_doc(dir: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, yaml).expect("failed to write deployment document");
    path
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp path should be UTF-8")
}

const STAGING_DOC: &str = r#"apiVersion: fde/v1
kind: Deployment
metadata:
  name: feature-store
  namespace: data
  environment: staging
spec:
  service:
    name: feature-store
    image: data/feature-store
    port: 7000
    resources:
      cpu: "2"
      memory: 4Gi
  scaling:
    minReplicas: 1
    maxReplicas: 50
  rollout:
    type: canary
    canaryPercentage: 10
"#;

// ---------------------------------------------------------------------------
// Successful validation
// ---------------------------------------------------------------------------

#[test]
fn sample_document_passes() {
    let output = fde_validate(&[path_arg(&sample_path())]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        output.status.success(),
        "sample should validate. stdout: {stdout}\nstderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Validation PASSED"));
    assert!(stdout.contains("Name: llm-service"));
    assert!(stdout.contains("Environment: production"));
    assert!(stdout.contains("Scaling: 2-8 replicas"));
    assert!(stdout.contains("observability-first"));
    assert!(stdout.contains("hybrid-bridge"));
    assert!(!stdout.contains("Warnings:"), "sample should be warning-free: {stdout}");
}

#[test]
fn warnings_do_not_change_exit_code() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "staging.yaml", STAGING_DOC);

    let output = fde_validate(&[path_arg(&path)]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stdout: {stdout}");
    assert!(stdout.contains("Warnings:"));
    assert!(stdout.contains("High maxReplicas (>10) may cause cost overruns"));
    assert!(stdout.contains("No health check defined"));
    assert!(stdout.contains("Metrics not enabled"));
    assert!(!stdout.contains("Production"));
    assert!(!stdout.contains("Pattern Recommendations:"));
    assert!(stdout.contains("Rollout: canary"));
}

#[test]
fn json_format_reports_result() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "staging.yaml", STAGING_DOC);

    let output = fde_validate(&["--format", "json", path_arg(&path)]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("Invalid JSON output: {e}\n{stdout}"));
    assert_eq!(parsed["valid"], true);
    assert_eq!(parsed["errors"].as_array().unwrap().len(), 0);
    assert_eq!(parsed["warnings"].as_array().unwrap().len(), 3);
    assert_eq!(parsed["config"]["metadata"]["name"], "feature-store");
    assert_eq!(parsed["config"]["spec"]["service"]["tag"], "latest");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn schema_violation_exits_one_with_errors() {
    let dir = TempDir::new().unwrap();
    let yaml = STAGING_DOC
        .replace("apiVersion: fde/v1", "apiVersion: v1")
        .replace("memory: 4Gi", "memory: 4GB");
    let path = write_doc(&dir, "broken.yaml", &yaml);

    let output = fde_validate(&[path_arg(&path)]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Validation FAILED"));
    assert!(stdout.contains(r#"apiVersion: Invalid literal value, expected "fde/v1""#));
    assert!(stdout.contains("spec.service.resources.memory: Memory must be like"));
    assert!(!stdout.contains("Summary:"));
}

#[test]
fn json_format_failure_still_exits_one() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "empty-spec.yaml", "apiVersion: fde/v1\nkind: Deployment\n");

    let output = fde_validate(&["--format", "json", path_arg(&path)]);
    assert_eq!(output.status.code(), Some(1));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["valid"], false);
    assert!(parsed.get("config").is_none());
    assert_eq!(
        parsed["errors"],
        serde_json::json!(["metadata: Required", "spec: Required"])
    );
}

#[test]
fn missing_file_is_reported_distinctly() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.yaml");

    let output = fde_validate(&[path_arg(&missing)]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("File not found:"), "stderr: {stderr}");
    assert!(stderr.contains("nope.yaml"));
    assert!(output.stdout.is_empty());
}

#[test]
fn malformed_yaml_is_a_generic_error() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "bad.yaml", "metadata: [unterminated\n");

    let output = fde_validate(&[path_arg(&path)]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.starts_with("Error: "), "stderr: {stderr}");
    assert!(!stderr.contains("File not found"));
    assert!(output.stdout.is_empty());
}

// ---------------------------------------------------------------------------
// Help and version
// ---------------------------------------------------------------------------

#[test]
fn version_flags_print_fixed_string() {
    for flag in ["--version", "-v"] {
        let output = fde_validate(&[flag]);
        assert!(output.status.success());
        assert_eq!(
            String::from_utf8_lossy(&output.stdout).trim(),
            "fde-deployment-patterns v0.1.0"
        );
    }
}

#[test]
fn help_flags_exit_zero() {
    for flag in ["--help", "-h"] {
        let output = fde_validate(&[flag]);
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Usage:"), "stdout: {stdout}");
        assert!(stdout.contains("Examples:"));
    }
}

#[test]
fn no_arguments_prints_usage() {
    let output = fde_validate(&[]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage:"));
}
