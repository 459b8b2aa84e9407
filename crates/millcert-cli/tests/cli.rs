//! Integration tests for the millcert CLI.

use assert_cmd::Command;
use predicates::prelude::*;

fn millcert() -> Command {
    Command::cargo_bin("millcert").unwrap()
}

#[test]
fn test_help() {
    millcert()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("vendors"))
        .stdout(predicate::str::contains("log"));
}

#[test]
fn test_process_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let vendor = dir.path().join("vendor.json");
    std::fs::write(
        &vendor,
        r#"{"vendor_id": "jsw", "vendor_name": "JSW Steel",
            "fields": {"PLATE_NO": "PP\\d+", "HEAT_NO": "SU\\d+", "TEST_CERT_NO": "ABC-\\d+"}}"#,
    )
    .unwrap();

    millcert()
        .arg("process")
        .arg(dir.path().join("nope.pdf"))
        .arg("--vendor")
        .arg(&vendor)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_vendors_lists_valid_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("jsw.json"),
        r#"{"vendor_id": "jsw", "vendor_name": "JSW Steel",
            "fields": {"PLATE_NO": "PP\\d+", "HEAT_NO": "SU\\d+", "TEST_CERT_NO": "ABC-\\d+"}}"#,
    )
    .unwrap();

    millcert()
        .arg("vendors")
        .arg("list")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("JSW Steel"))
        .stdout(predicate::str::contains("PLATE_NO"));
}

#[test]
fn test_vendors_validate_rejects_bad_pattern() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("bad.json"),
        r#"{"vendor_id": "bad", "vendor_name": "Bad",
            "fields": {"PLATE_NO": "(", "HEAT_NO": "b", "TEST_CERT_NO": "c"}}"#,
    )
    .unwrap();

    millcert()
        .arg("vendors")
        .arg("list")
        .arg(dir.path())
        .arg("--validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid vendor config"));
}

#[test]
fn test_vendors_detect_requires_vendor_configs() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("cert.pdf");
    std::fs::write(&pdf, b"%PDF-1.4 stub").unwrap();

    millcert()
        .arg("vendors")
        .arg("detect")
        .arg(&pdf)
        .arg("--vendors")
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn test_log_on_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        format!(
            r#"{{"log_file": "{}"}}"#,
            dir.path().join("log.csv").display()
        ),
    )
    .unwrap();

    millcert()
        .arg("log")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching records"));
}
