// tests/upload.rs

mod common;

use std::path::Path;
use std::time::{Duration, Instant};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use swag_cli::api::UploadClient;
use swag_cli::config::UploadConfig;
use swag_cli::CliError;

use common::{serve_once, serve_once_after, serve_silently, write_fixture};

const EXPECTED_FORM: &str = "type=swagger&json=%7B%22a%22%3A1%7D&merge=true&token=";

fn swag_cli() -> Command {
    let mut cmd = Command::cargo_bin("swag-cli").unwrap();
    cmd.env_remove("SWAG_UPLOAD_TOKEN").env("RUST_LOG", "warn");
    cmd
}

#[test]
fn uploads_form_and_prints_body_even_on_server_error() {
    let dir = TempDir::new().unwrap();
    let (server, handle) = serve_once("500 Internal Server Error", "boom");
    let config = write_fixture(dir.path(), &server, "T");

    swag_cli()
        .args(["upload", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout("boom\n");

    let request = handle.join().unwrap();
    assert!(request.head.starts_with("post /api/open/import_data http/1.1"));
    assert!(request
        .head
        .contains("content-type: application/x-www-form-urlencoded"));
    assert!(request.head.contains("connection: close"));
    assert_eq!(request.body, format!("{EXPECTED_FORM}T"));
}

#[test]
fn request_token_overrides_config_token() {
    let dir = TempDir::new().unwrap();
    let (server, handle) = serve_once("200 OK", r#"{"errcode":0}"#);
    let config = write_fixture(dir.path(), &server, "config-token");

    swag_cli()
        .args(["u", "--token", "override", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"errcode":0}"#));

    let request = handle.join().unwrap();
    assert_eq!(request.body, format!("{EXPECTED_FORM}override"));
}

#[test]
fn empty_request_token_falls_back_to_config_token() {
    let dir = TempDir::new().unwrap();
    let (server, handle) = serve_once("200 OK", "ok");
    let config = write_fixture(dir.path(), &server, "config-token");

    swag_cli()
        .env("SWAG_UPLOAD_TOKEN", "")
        .args(["upload", "-c"])
        .arg(&config)
        .assert()
        .success();

    let request = handle.join().unwrap();
    assert_eq!(request.body, format!("{EXPECTED_FORM}config-token"));
}

#[test]
fn fail_on_status_turns_server_errors_into_failures() {
    let dir = TempDir::new().unwrap();
    let (server, handle) = serve_once("500 Internal Server Error", "boom");
    let config = write_fixture(dir.path(), &server, "T");

    swag_cli()
        .args(["upload", "--fail-on-status", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("500"));

    handle.join().unwrap();
}

#[test]
fn refused_connection_fails_and_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let server = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let config = write_fixture(dir.path(), &server, "T");

    swag_cli()
        .args(["upload", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("request to"));
}

#[test]
fn missing_document_fails_before_any_request() {
    let dir = TempDir::new().unwrap();
    let server = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let config = write_fixture(dir.path(), &server, "T");
    std::fs::remove_file(dir.path().join("spec.json")).unwrap();

    swag_cli()
        .args(["upload", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("read file"));
}

#[test]
fn missing_required_key_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("swag.yaml");
    std::fs::write(&config, "swagger:\n  type: swagger\n").unwrap();

    swag_cli()
        .args(["upload", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing key swagger.server"));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    swag_cli()
        .arg("publish")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn library_upload_returns_status_and_body() {
    let dir = TempDir::new().unwrap();
    let (server, handle) = serve_once("404 Not Found", "missing project");
    let config_path = write_fixture(dir.path(), &server, "T");

    let config = UploadConfig::load(config_path.to_str().unwrap(), Path::new("docs")).unwrap();
    let client = UploadClient::new(&config, None).unwrap();
    let response = client.upload(&config).unwrap();

    assert_eq!(response.status.as_u16(), 404);
    assert_eq!(response.body, b"missing project");
    handle.join().unwrap();
}

#[test]
fn timeout_against_a_silent_server_is_a_network_error() {
    let dir = TempDir::new().unwrap();
    let server = serve_silently(Duration::from_secs(5));
    let config_path = write_fixture(dir.path(), &server, "T");

    let config = UploadConfig::load(config_path.to_str().unwrap(), Path::new("docs")).unwrap();
    let client = UploadClient::new(&config, Some(Duration::from_millis(300))).unwrap();
    let err = client.upload(&config).unwrap_err();
    assert!(matches!(err, CliError::Network { .. }));
}

#[test]
fn no_timeout_waits_past_the_http_client_default() {
    let dir = TempDir::new().unwrap();
    let (server, handle) = serve_once_after(Duration::from_secs(32), "200 OK", "imported");
    let config_path = write_fixture(dir.path(), &server, "T");

    let config = UploadConfig::load(config_path.to_str().unwrap(), Path::new("docs")).unwrap();
    assert_eq!(config.timeout, None);
    let client = UploadClient::new(&config, None).unwrap();

    let started = Instant::now();
    let response = client.upload(&config).unwrap();
    assert!(started.elapsed() >= Duration::from_secs(31));
    assert_eq!(response.body, b"imported");
    handle.join().unwrap();
}
