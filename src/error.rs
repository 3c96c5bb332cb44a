// Error types shared by the handlers.
// Each variant maps to one failure class of the CLI; `main` turns any of
// them into a logged message and a nonzero exit status.

use std::path::PathBuf;

use crate::config::ConfigError;

/// The primary error type for the library surface of the CLI.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A flag value was rejected before any work started.
    #[error("{0}")]
    Validation(String),

    /// The upload configuration could not be loaded or was malformed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The document to upload could not be read.
    #[error("read file [{}] failed: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request could not be built or sent (includes timeouts).
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived but its body could not be read.
    #[error("read response failed: {0}")]
    ResponseRead(#[source] reqwest::Error),

    /// Only produced when status checking is switched on.
    #[error("server responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("generator failed: {0}")]
    Generator(String),
}
