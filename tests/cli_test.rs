//! CLI integration tests
//!
//! Tests for the command-line interface using assert_cmd.
//!
//! These tests verify:
//! - Help and version flags
//! - Configuration validation
//! - Fatal startup on missing or invalid configuration
//! - Single-pass mode against a mock coordinator

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::io::Write;
use std::net::UdpSocket;
use std::time::Duration;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get a command for the presto-metrico binary with a clean environment
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd =
        Command::cargo_bin("presto-metrico").expect("Failed to find presto-metrico binary");
    cmd.env_remove("PRESTO_COORDINATOR")
        .env_remove("PRESTO_METRICO_DOGSTATSD")
        .env_remove("PRESTO_METRICO_INTERVAL")
        .env_remove("PRESTO_METRICO_TIMEOUT")
        .env_remove("PRESTO_METRICO_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create a temporary config file with given content
fn create_temp_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file.flush().expect("Failed to flush");
    file
}

/// Test --help flag displays usage information
#[test]
fn test_help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--coordinator"))
        .stdout(predicate::str::contains("--dogstatsd"))
        .stdout(predicate::str::contains("--timer"));
}

/// Test --version flag displays version
#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that a missing coordinator address is fatal
#[test]
fn test_missing_coordinator_fails() {
    cmd()
        .arg("--validate")
        .timeout(Duration::from_secs(5))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing coordinator address"));
}

/// Test that a coordinator from the command line validates
#[test]
fn test_validate_with_coordinator_flag() {
    cmd()
        .args(["-c", "http://presto:8080", "--validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

/// Test that the coordinator can come from the environment
#[test]
fn test_validate_with_coordinator_env() {
    cmd()
        .env("PRESTO_COORDINATOR", "http://presto:8080")
        .arg("--validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

/// Test that a valid configuration file is accepted
#[test]
fn test_validate_config_file() {
    let config = r#"
coordinator:
  url: "http://presto:8080"
  timeout_ms: 2000
statsd:
  address: "127.0.0.1:8125"
collection:
  interval_secs: 10
"#;

    let file = create_temp_config(config);

    cmd()
        .arg("--config")
        .arg(file.path())
        .arg("--validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

/// Test that invalid YAML is rejected
#[test]
fn test_validate_invalid_config_bad_yaml() {
    let config = r#"
coordinator:
  url: [not valid yaml
"#;

    let file = create_temp_config(config);

    cmd()
        .arg("--config")
        .arg(file.path())
        .arg("--validate")
        .timeout(Duration::from_secs(5))
        .assert()
        .failure();
}

/// Test that a nonexistent config file is an error
#[test]
fn test_missing_config_file() {
    cmd()
        .args(["-c", "http://presto:8080"])
        .args(["--config", "/nonexistent/path/config.yaml"])
        .arg("--validate")
        .timeout(Duration::from_secs(5))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

/// Test that an unparseable coordinator url is rejected
#[test]
fn test_invalid_coordinator_url() {
    cmd()
        .args(["-c", "presto without scheme", "--validate"])
        .timeout(Duration::from_secs(5))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid coordinator url"));
}

/// Test that a zero interval is rejected
#[test]
fn test_zero_timer_rejected() {
    cmd()
        .args(["-c", "http://presto:8080", "-t", "0", "--validate"])
        .timeout(Duration::from_secs(5))
        .assert()
        .failure();
}

/// Test that --once performs exactly one pass and exits
#[tokio::test(flavor = "multi_thread")]
async fn test_once_sends_gauges() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/v1/jmx/mbean/com.facebook.presto.memory:name=ClusterMemoryManager",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "attributes": [{"name": "ClusterMemoryBytes", "value": 8192}]
        })))
        .mount(&mock_server)
        .await;

    let agent = UdpSocket::bind("127.0.0.1:0").unwrap();
    agent.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let agent_addr = agent.local_addr().unwrap().to_string();

    cmd()
        .arg("-c")
        .arg(mock_server.uri())
        .arg("-d")
        .arg(&agent_addr)
        .arg("--once")
        .timeout(Duration::from_secs(30))
        .assert()
        .success();

    let mut buf = [0u8; 512];
    let n = agent.recv(&mut buf).unwrap();
    assert_eq!(
        std::str::from_utf8(&buf[..n]).unwrap(),
        "data.presto.clusterMemoryManager.ClusterMemoryBytes:8192|g"
    );
}
