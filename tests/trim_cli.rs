use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn trim_reports_the_cruise_case() {
    Command::cargo_bin("trim")
        .expect("trim bin")
        .args([
            "--wing",
            "data/wings/tapered.yaml",
            "--case",
            "data/cases/cruise.yaml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== tapered-12 / cruise ==="))
        .stdout(predicate::str::contains("CL = 1.10000"))
        .stdout(predicate::str::contains("alpha = 12.630 deg"))
        .stdout(predicate::str::contains("Converged in"));
}

#[test]
fn trim_writes_loading_and_summary_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("cruise.csv");
    Command::cargo_bin("trim")
        .expect("trim bin")
        .args([
            "--wing",
            "data/wings/tapered.yaml",
            "--case",
            "data/cases/cruise.yaml",
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loading written to"))
        .stdout(predicate::str::contains("Summary written to"));

    let csv = fs::read_to_string(&output).expect("loading csv");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("station,eta,chord,gamma,section_cl,ccl"));
    assert_eq!(lines.count(), 16, "one row per panel");

    let summary =
        fs::read_to_string(dir.path().join("cruise_summary.json")).expect("summary json");
    assert!(
        summary.contains("\"wing\": \"tapered-12\""),
        "summary: {summary}"
    );
    assert!(summary.contains("\"converged\": true"), "summary: {summary}");
    assert!(summary.contains("\"panels\": 16"), "summary: {summary}");
}

#[test]
fn trim_streams_loading_to_stdout_without_a_sidecar() {
    Command::cargo_bin("trim")
        .expect("trim bin")
        .args([
            "--wing",
            "data/wings/tapered.yaml",
            "--case",
            "data/cases/cruise.yaml",
            "--output",
            "-",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("station,eta,chord,gamma,section_cl,ccl"))
        .stdout(predicate::str::contains("Summary written").not());
}

#[test]
fn panel_and_spacing_overrides_trump_the_manifest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("coarse.csv");
    Command::cargo_bin("trim")
        .expect("trim bin")
        .args([
            "--wing",
            "data/wings/tapered.yaml",
            "--case",
            "data/cases/cruise.yaml",
            "--panels",
            "8",
            "--spacing",
            "uniform",
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let csv = fs::read_to_string(&output).expect("loading csv");
    assert_eq!(csv.lines().count(), 9, "header plus eight panels");
}

#[test]
fn conflicting_trim_pairs_fail_with_a_diagnostic() {
    let dir = tempfile::tempdir().expect("tempdir");
    let case = dir.path().join("bad.yaml");
    fs::write(
        &case,
        "name: bad
alpha_deg:
  mode: specified
  value: 2.0
lift:
  mode: specified
  value: 0.8
",
    )
    .expect("write case");
    Command::cargo_bin("trim")
        .expect("trim bin")
        .args([
            "--wing",
            "data/wings/tapered.yaml",
            "--case",
            case.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly one specified member"));
}

#[test]
fn winds_reports_a_percentile_speed() {
    Command::cargo_bin("winds")
        .expect("winds bin")
        .args(["--latitude", "35", "--altitude-ft", "16000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("550 hPa archive"))
        .stdout(predicate::str::contains("30.60 m/s"));
}

#[test]
fn winds_rejects_altitudes_between_levels() {
    Command::cargo_bin("winds")
        .expect("winds bin")
        .args(["--latitude", "35", "--altitude-ft", "14000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no stored pressure level"));
}
