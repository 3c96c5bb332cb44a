// Shared helpers for the integration tests: a one-shot HTTP server on the
// loopback interface that records the request it receives.

#![allow(dead_code)]

use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// What the fake server saw.
pub struct CapturedRequest {
    /// Request line and headers, lowercased.
    pub head: String,
    pub body: String,
}

/// Accept a single connection, record the request and answer with
/// `status_line` and `body`. Returns the base URL and a handle yielding the
/// captured request.
pub fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<CapturedRequest>) {
    serve_once_after(Duration::ZERO, status_line, body)
}

/// Like `serve_once`, but waits `delay` after reading the request before
/// answering.
pub fn serve_once_after(
    delay: Duration,
    status_line: &'static str,
    body: &'static str,
) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let captured = read_request(&mut stream);
        thread::sleep(delay);
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        captured
    });
    (url, handle)
}

/// Accept a single connection and never answer it.
pub fn serve_silently(hold_for: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(hold_for);
            drop(stream);
        }
    });
    url
}

fn read_request(stream: &mut impl Read) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed before headers were complete");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .map(|v| v.trim().parse::<usize>().unwrap())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed before body was complete");
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..header_end + content_length]).into_owned();
    CapturedRequest { head, body }
}

/// Write `spec.json` and a TOML config pointing at `server` into `dir`.
/// Returns the config path.
pub fn write_fixture(dir: &Path, server: &str, token: &str) -> PathBuf {
    let spec = dir.join("spec.json");
    fs::write(&spec, r#"{"a":1}"#).unwrap();
    let config = dir.join("swag.toml");
    fs::write(
        &config,
        format!(
            "[swagger]\ntype = \"swagger\"\ntoken = \"{token}\"\nfile_path = '{}'\nserver = \"{server}\"\nmerge = \"true\"\n",
            spec.display()
        ),
    )
    .unwrap();
    config
}
