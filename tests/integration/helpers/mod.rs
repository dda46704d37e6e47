//! Shared fixtures for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Directory holding test fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixture(name)).expect("fixture exists")
}

/// Copy a fixture into a fresh temp dir, optionally under another name.
pub fn temp_fixture(name: &str, as_name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(as_name);
    fs::copy(fixture(name), &path).expect("copy fixture");
    (dir, path)
}

/// The seapay binary, isolated from any user configuration.
pub fn seapay(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("seapay").expect("binary built");
    cmd.env("SEAPAY_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}
