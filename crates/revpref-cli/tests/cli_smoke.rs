use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures")
        .join(name)
}

fn revpref(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_revpref"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn revpref")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json on stdout")
}

#[test]
fn check_reports_garp_violation() {
    let data = fixture("strict_cycle.json");
    let report = stdout_json(&revpref(&["check", "--data", data.to_str().unwrap()]));
    let checks = report["checks"].as_array().unwrap();
    assert_eq!(checks.len(), 7);
    assert_eq!(checks[0]["axiom"], "garp");
    assert_eq!(checks[0]["pass"], false);
    assert_eq!(checks[0]["witness"]["kind"], "strict_reversal");
    assert_eq!(report["analysis_hash"].as_str().unwrap().len(), 64);
}

#[test]
fn check_honours_config_and_out() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("reports/check.json");
    let data = fixture("crossing_budgets.csv");
    let config = fixture("check.yaml");
    let output = revpref(&[
        "check",
        "--data",
        data.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let report: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let axioms: Vec<&str> = report["checks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|check| check["axiom"].as_str().unwrap())
        .collect();
    assert_eq!(axioms, vec!["garp", "sarp", "strong_sarp", "harp"]);
}

#[test]
fn normalization_violation_fails_unless_rescaled() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("scaled.json");
    std::fs::write(
        &data,
        r#"{"prices": [[2.0, 0.0], [0.0, 1.0]], "bundles": [[1.0, 2.0], [2.0, 1.0]]}"#,
    )
    .unwrap();
    let config = fixture("check.yaml");
    let base = ["check", "--data", data.to_str().unwrap(), "--config", config.to_str().unwrap()];

    let output = revpref(&base);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("normalization-violation"));

    let mut rescaled = base.to_vec();
    rescaled.push("--normalize");
    let report = stdout_json(&revpref(&rescaled));
    assert_eq!(report["checks"][0]["pass"], true);
}

#[test]
fn relations_and_modify_emit_matrices() {
    let data = fixture("repeated_choice.json");
    let data = data.to_str().unwrap();

    let relations = stdout_json(&revpref(&["relations", "--data", data]));
    assert_eq!(relations["direct_weak"][0], serde_json::json!([true, true]));
    assert_eq!(relations["direct_strict"][1], serde_json::json!([false, false]));

    let single = stdout_json(&revpref(&["modify", "--data", data, "--single-step"]));
    assert_eq!(single["iterations"], 1);
    assert_eq!(single["prices"][1], serde_json::json!([0.25, 0.5]));

    let fixed = stdout_json(&revpref(&["modify", "--data", data]));
    assert_eq!(fixed["iterations"], 2);
}

#[test]
fn generate_then_normalize_round_trip() {
    let dir = tempdir().unwrap();
    let panel = dir.path().join("panel.csv");
    let output = revpref(&[
        "generate",
        "--kind",
        "uniform",
        "--seed",
        "3",
        "--observations",
        "6",
        "--goods",
        "2",
        "--out",
        panel.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let normalized = dir.path().join("normalized.json");
    let output = revpref(&[
        "normalize",
        "--data",
        panel.to_str().unwrap(),
        "--out",
        normalized.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let file: Value = serde_json::from_str(&std::fs::read_to_string(&normalized).unwrap()).unwrap();
    assert_eq!(file["prices"].as_array().unwrap().len(), 6);
}
