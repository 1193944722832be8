// Integration tests for `dlens report` and `dlens validate`.
// Run with: cargo test -p discountlens-cli --test report_tests -- --nocapture

use std::path::PathBuf;
use std::process::Command;

fn dlens() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dlens"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("DLENS_CONFIG");
    cmd
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../yoy/tests/fixtures")
        .join(name)
}

// ---------------------------------------------------------------------------
// report
// ---------------------------------------------------------------------------

#[test]
fn report_json_to_stdout() {
    let output = dlens()
        .args(["report", fixture("sales.json").to_str().unwrap(), "--json"])
        .output()
        .expect("dlens report --json");

    assert!(output.status.success(), "exit code was {:?}", output.status);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");

    assert_eq!(report["rows"].as_array().unwrap().len(), 12);
    assert_eq!(report["rows"][2]["month"], "March");
    assert_eq!(report["rows"][2]["transactions2024"], 1);
    assert_eq!(report["totals"]["month"], "TOTAL");
    assert_eq!(report["totals"]["discountChange"], 140.0);
    assert_eq!(report["meta"]["skippedDates"], 1);
}

#[test]
fn report_csv_with_config_prints_table() {
    let output = dlens()
        .args([
            "report",
            fixture("sales.csv").to_str().unwrap(),
            "--config",
            fixture("sales.yoy.toml").to_str().unwrap(),
        ])
        .output()
        .expect("dlens report csv");

    assert!(output.status.success(), "exit code was {:?}", output.status);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("Month"));
    assert!(lines.iter().any(|l| l.starts_with("TOTAL") && l.contains("+140.0%")));
    assert!(stdout.contains("revenue impact: 300.00"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 skipped"), "stderr: {stderr}");
}

#[test]
fn report_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("report.json");

    let output = dlens()
        .args([
            "report",
            fixture("sales.json").to_str().unwrap(),
            "--output",
            out_path.to_str().unwrap(),
        ])
        .output()
        .expect("dlens report --output");

    assert!(output.status.success());

    let written = std::fs::read_to_string(&out_path).unwrap();
    let report: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(report["summary"]["revenueImpact"], 300.0);
}

#[test]
fn report_unknown_extension_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.txt");
    std::fs::write(&path, "paymentDate\n").unwrap();

    let output = dlens()
        .args(["report", path.to_str().unwrap()])
        .output()
        .expect("dlens report sales.txt");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--format"), "stderr: {stderr}");
}

#[test]
fn report_explicit_format_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.txt");
    std::fs::write(&path, "paymentDate,paymentValue,discountAmount\n2025-02-01,100,10\n").unwrap();

    let output = dlens()
        .args(["report", path.to_str().unwrap(), "--format", "csv", "--json"])
        .output()
        .expect("dlens report --format csv");

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(report["rows"][1]["transactions2025"], 1);
}

#[test]
fn report_missing_input_is_io_error() {
    let output = dlens()
        .args(["report", "does-not-exist.json"])
        .output()
        .expect("dlens report missing");

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn report_bad_amount_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "paymentDate,paymentValue,discountAmount\n2025-02-01,lots,10\n").unwrap();

    let output = dlens()
        .args(["report", path.to_str().unwrap()])
        .output()
        .expect("dlens report bad.csv");

    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn report_invalid_utf8_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.csv");
    std::fs::write(&path, b"paymentDate,customerEmail\n2025-02-01,caf\xe9@x.com\n").unwrap();

    let output = dlens()
        .args(["report", path.to_str().unwrap()])
        .output()
        .expect("dlens report latin1.csv");

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not valid UTF-8"), "stderr: {stderr}");
}

#[test]
fn report_accepts_null_dates_and_quoted_amounts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.json");
    std::fs::write(
        &path,
        r#"[
            {"paymentDate": null, "paymentValue": 100, "discountAmount": 10},
            {"paymentDate": "2024-06-01", "paymentValue": "1,500", "discountAmount": "150"}
        ]"#,
    )
    .unwrap();

    let output = dlens()
        .args(["report", path.to_str().unwrap(), "--json"])
        .output()
        .expect("dlens report export.json");

    assert!(output.status.success(), "exit code was {:?}", output.status);
    let report: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(report["meta"]["skippedDates"], 1);
    assert_eq!(report["rows"][5]["revenue2024"], 1500.0);
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_good_config() {
    let output = dlens()
        .args(["validate", fixture("sales.yoy.toml").to_str().unwrap()])
        .output()
        .expect("dlens validate");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("valid: 2024 vs 2025"), "stderr: {stderr}");
}

#[test]
fn validate_rejects_equal_years() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yoy.toml");
    std::fs::write(&path, "baseline_year = 2025\ncurrent_year = 2025\n").unwrap();

    let output = dlens()
        .args(["validate", path.to_str().unwrap()])
        .output()
        .expect("dlens validate bad");

    assert_eq!(output.status.code(), Some(5));
}
