// Upload client: a small blocking HTTP client that pushes a generated API
// document to the server's import endpoint as a url-encoded form.
// One request per run, no retries, no pooled connections.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, CONNECTION};
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::config::UploadConfig;
use crate::error::CliError;

/// Path of the import endpoint, appended to the configured server.
pub const IMPORT_PATH: &str = "/api/open/import_data";

/// Blocking client bound to one server, with an optional per-request token
/// that takes precedence over the token from the config file.
#[derive(Clone)]
pub struct UploadClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout: Option<Duration>,
    fail_on_status: bool,
}

/// Form fields sent to the import endpoint.
#[derive(Debug, PartialEq, Eq)]
pub struct UploadForm<'a> {
    pub doc_type: &'a str,
    pub json: &'a str,
    pub merge: &'a str,
    pub token: &'a str,
}

impl<'a> UploadForm<'a> {
    /// Fields in the order they go on the wire.
    pub fn fields(&self) -> [(&'static str, &'a str); 4] {
        [
            ("type", self.doc_type),
            ("json", self.json),
            ("merge", self.merge),
            ("token", self.token),
        ]
    }
}

/// What came back from the server. The body is kept as raw bytes.
#[derive(Debug)]
pub struct UploadResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl UploadClient {
    /// Build a client for `config.server`. `timeout` bounds the whole
    /// request; `None` waits indefinitely.
    pub fn new(config: &UploadConfig, timeout: Option<Duration>) -> Result<Self, CliError> {
        // the blocking builder defaults to 30s; None must switch that off
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .timeout(timeout)
            .build()
            .map_err(|source| CliError::Network {
                url: config.server.clone(),
                source,
            })?;
        Ok(UploadClient {
            client,
            base_url: config.server.clone(),
            token: None,
            timeout,
            fail_on_status: config.fail_on_status,
        })
    }

    /// Store a per-request token. An empty token is ignored at send time.
    pub fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    /// Returns whether a per-request token is present in the client.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Deadline applied to the whole request, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Treat non-2xx responses as errors instead of printing them.
    pub fn set_fail_on_status(&mut self, fail: bool) {
        self.fail_on_status = fail;
    }

    /// Read `config.file` and POST it to the import endpoint.
    ///
    /// The file is read before anything touches the network. Any HTTP status
    /// counts as success unless status checking was switched on.
    pub fn upload(&self, config: &UploadConfig) -> Result<UploadResponse, CliError> {
        let bytes = std::fs::read(&config.file).map_err(|source| CliError::Io {
            path: config.file.clone(),
            source,
        })?;
        let json = String::from_utf8_lossy(&bytes);

        let form = UploadForm {
            doc_type: &config.doc_type,
            json: &json,
            merge: &config.merge,
            token: resolve_token(self.token.as_deref(), &config.token),
        };
        let url = import_url(&self.base_url);
        info!(
            url = %url,
            file = %config.file.display(),
            size = bytes.len(),
            "uploading document"
        );

        let res = self
            .client
            .post(&url)
            .header(CONNECTION, HeaderValue::from_static("close"))
            .form(&form.fields())
            .send()
            .map_err(|source| CliError::Network {
                url: url.clone(),
                source,
            })?;

        let status = res.status();
        let body = res.bytes().map_err(CliError::ResponseRead)?.to_vec();
        debug!(%status, body_len = body.len(), "import response received");

        if self.fail_on_status && !status.is_success() {
            return Err(CliError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(UploadResponse { status, body })
    }
}

/// Pick the token to send: a non-empty per-request token wins, otherwise the
/// config-level one.
pub fn resolve_token<'a>(request: Option<&'a str>, default: &'a str) -> &'a str {
    match request {
        Some(token) if !token.is_empty() => token,
        _ => default,
    }
}

/// Full URL of the import endpoint for `server`.
pub fn import_url(server: &str) -> String {
    format!("{}{}", server.trim_end_matches('/'), IMPORT_PATH)
}
