//! Integration tests for the `dcnmctl` binary.
//!
//! Argument parsing, help output, completions and error exit codes run
//! without a controller; a few end-to-end cases drive a wiremock one.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `dcnmctl` binary with env isolation.
///
/// Runs inside `dir` and clears the `DCNM_*` variables so tests never
/// pick up a real controller.
fn dcnmctl_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("dcnmctl");
    cmd.current_dir(dir)
        .env_remove("DCNM_HOST")
        .env_remove("DCNM_USER")
        .env_remove("DCNM_PASS")
        .env_remove("DCNM_VERIFY")
        .env_remove("DCNM_VERSION")
        .env_remove("RUST_LOG");
    cmd
}

fn write_conn(dir: &Path, host: &str) {
    let conn = json!({ "DCNM_HOST": host, "DCNM_USER": "admin", "DCNM_PASS": "secret" });
    std::fs::write(dir.join("server.json"), conn.to_string()).unwrap();
}

fn write_switches(dir: &Path) {
    let data = json!({
        "site-1": [{
            "serialNumber": "A1",
            "hostname": "leaf-1",
            "ipAddress": "10.1.1.1/24",
            "discoveryUsername": "admin",
            "discoveryPassword": "pw",
            "switchRole": "leaf"
        }]
    });
    std::fs::write(dir.join("switches.json"), data.to_string()).unwrap();
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let dir = TempDir::new().unwrap();
    let output = dcnmctl_cmd(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let dir = TempDir::new().unwrap();
    dcnmctl_cmd(dir.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("switch")
            .and(predicate::str::contains("fabric"))
            .and(predicate::str::contains("template"))
            .and(predicate::str::contains("server")),
    );
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    dcnmctl_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dcnmctl"));
}

#[test]
fn test_switch_subcommands_exist() {
    let dir = TempDir::new().unwrap();
    dcnmctl_cmd(dir.path())
        .args(["switch", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("poap")
                .and(predicate::str::contains("role"))
                .and(predicate::str::contains("list")),
        );
}

#[test]
fn test_poap_requires_fabric() {
    let dir = TempDir::new().unwrap();
    dcnmctl_cmd(dir.path())
        .args(["switch", "poap"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--fabric"));
}

#[test]
fn test_invalid_output_format() {
    let dir = TempDir::new().unwrap();
    dcnmctl_cmd(dir.path())
        .args(["-o", "xml", "server"])
        .assert()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    dcnmctl_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_missing_connection_data_is_config_error() {
    let dir = TempDir::new().unwrap();
    dcnmctl_cmd(dir.path())
        .arg("server")
        .assert()
        .code(9)
        .stderr(predicate::str::contains("DCNM_HOST"));
}

#[test]
fn test_missing_switch_file_fails_before_connecting() {
    let dir = TempDir::new().unwrap();
    write_conn(dir.path(), "127.0.0.1:1");
    dcnmctl_cmd(dir.path())
        .args(["switch", "poap", "--fabric", "site-1"])
        .assert()
        .code(9)
        .stderr(predicate::str::contains("switches.json"));
}

#[test]
fn test_unknown_fabric_in_switch_data() {
    let dir = TempDir::new().unwrap();
    write_conn(dir.path(), "127.0.0.1:1");
    write_switches(dir.path());
    dcnmctl_cmd(dir.path())
        .args(["switch", "role", "--fabric", "site-9"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("site-9"));
}

// ── Against a mock controller ───────────────────────────────────────

async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_reports_dcnm_version() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/dcnm-version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Dcnm-Version": "11.5(1)" })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write_conn(dir.path(), &server.uri());
    let mut cmd = dcnmctl_cmd(dir.path());
    cmd.args(["-o", "plain", "server"]);

    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "11.5(1)");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_poap_without_eligible_switches_exits_1() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "jwttoken": "jwt" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/appcenter/cisco/ndfc/api/v1/lan-fabric/rest/control/fabrics/site-1/inventory/poap",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write_conn(dir.path(), &server.uri());
    write_switches(dir.path());
    let mut cmd = dcnmctl_cmd(dir.path());
    cmd.args(["--dcnm-version", "12.1.2e", "switch", "poap", "--fabric", "site-1"]);

    let output = run(cmd).await;
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("No switches found"));
}
