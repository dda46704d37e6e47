//! Integration tests for the seapay binary

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixture, seapay, temp_fixture};

// ============================================================================
// Extract
// ============================================================================

#[test]
fn extract_prints_text_report() {
    let (dir, path) = temp_fixture("cert_2024.txt", "cert_2024.txt");

    seapay(&dir)
        .arg("extract")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("== cert_2024.txt =="))
        .stdout(predicate::str::contains("DOE, JOHN A"))
        .stdout(predicate::str::contains(
            "USS ABRAHAM LINCOLN | 01/02/2024 to 01/06/2024 | 5 days",
        ))
        .stdout(predicate::str::contains("Total: 7 days"))
        .stdout(predicate::str::contains("p1:l6 duplicate date"))
        .stdout(predicate::str::contains("unresolved ship: 'USS ZEPHYRUS'"));
}

#[test]
fn extract_json_is_machine_readable() {
    let (dir, path) = temp_fixture("cert_2024.txt", "cert_2024.txt");

    let output = seapay(&dir)
        .args(["extract", "--format", "json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let report = &reports[0];
    assert_eq!(report["source"], "cert_2024.txt");
    assert_eq!(report["sailors"][0]["sailor"], "DOE, JOHN A");
    assert_eq!(report["sailors"][0]["total_days"], 7);
    assert_eq!(report["sailors"][0]["periods"][0]["start"], "2024-01-02");
    assert_eq!(report["diagnostics"].as_array().unwrap().len(), 4);
}

#[test]
fn extract_sailor_option_covers_sheets_without_header() {
    let (dir, path) = temp_fixture("no_header.txt", "no_header.txt");

    seapay(&dir)
        .args(["extract", "--sailor", "doe,  jane"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("DOE, JANE"))
        .stdout(predicate::str::contains(
            "USS WASP | 02/03/2024 to 02/06/2024 | 4 days",
        ));
}

#[test]
fn extract_without_sailor_reports_missing_sailor() {
    let (dir, path) = temp_fixture("no_header.txt", "no_header.txt");

    seapay(&dir)
        .arg("extract")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No sea service found."))
        .stdout(predicate::str::contains("p2:l1 missing sailor"));
}

#[test]
fn extract_merge_gap_joins_boxer_days() {
    let (dir, path) = temp_fixture("cert_2024.txt", "cert_2024.txt");

    seapay(&dir)
        .args(["extract", "--merge-gap", "2"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "USS BOXER | 01/09/2024 to 01/11/2024 | 3 days",
        ));
}

#[test]
fn extract_uses_ship_reference_file() {
    let (dir, path) = temp_fixture("cert_2024.txt", "cert_2024.txt");

    seapay(&dir)
        .arg("extract")
        .arg("--ships")
        .arg(fixture("ships.toml"))
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("USS ABRAHAM LINCOLN | 01/02/2024"));
}

#[test]
fn extract_merge_gap_from_config_file() {
    let (dir, path) = temp_fixture("cert_2024.txt", "cert_2024.txt");
    std::fs::write(
        dir.path().join("config.toml"),
        "[engine]\nmerge_gap_days = 2\n",
    )
    .unwrap();

    seapay(&dir)
        .arg("extract")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("USS BOXER | 01/09/2024 to 01/11/2024"));
}

#[test]
fn extract_missing_file_fails_after_processing_others() {
    let (dir, path) = temp_fixture("cert_2024.txt", "cert_2024.txt");

    seapay(&dir)
        .arg("extract")
        .arg(&path)
        .arg("nonexistent.txt")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("DOE, JOHN A"))
        .stderr(predicate::str::contains("File not found"))
        .stderr(predicate::str::contains("1 of 2 files could not be processed"));
}

#[test]
fn extract_without_files_is_a_usage_error() {
    let dir = TempDir::new().unwrap();

    seapay(&dir)
        .arg("extract")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<FILES>"));
}

#[test]
fn extract_rejects_bad_ship_reference() {
    let (dir, path) = temp_fixture("cert_2024.txt", "cert_2024.txt");

    seapay(&dir)
        .arg("extract")
        .arg("--ships")
        .arg(fixture("conflict.txt"))
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("maps to both"));
}

// ============================================================================
// Ships
// ============================================================================

#[test]
fn ships_check_counts_entries() {
    let dir = TempDir::new().unwrap();

    seapay(&dir)
        .args(["ships", "check"])
        .arg(fixture("ships.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("3 ships"));
}

#[test]
fn ships_check_reports_conflicting_alias() {
    let dir = TempDir::new().unwrap();

    seapay(&dir)
        .args(["ships", "check"])
        .arg(fixture("conflict.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("maps to both"));
}

#[test]
fn ships_list_shows_builtin_fleet() {
    let dir = TempDir::new().unwrap();

    seapay(&dir)
        .args(["ships", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("USS ABRAHAM LINCOLN | CVN 72"));
}

// ============================================================================
// Config and Misc
// ============================================================================

#[test]
fn config_path_honours_environment() {
    let dir = TempDir::new().unwrap();
    let expected = dir.path().join("config.toml");

    seapay(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();

    seapay(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("merge_gap_days = 1"));
}

#[test]
fn version_names_the_binary() {
    let dir = TempDir::new().unwrap();

    seapay(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("seapay "));
}

#[test]
fn completions_generate_for_bash() {
    let dir = TempDir::new().unwrap();

    seapay(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seapay"));
}
