// Upload configuration: locating, parsing and validating the settings file.
//
// The file is parsed into a loosely typed document first (TOML, YAML or
// JSON, picked from the extension) and every key under `swagger` is then
// looked up with an explicit expected type. A missing or mistyped key comes
// back as a `ConfigError` instead of bringing the process down.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{debug, info};

/// Basename of the per-user fallback config, looked up in the home directory.
pub const HOME_CONFIG_NAME: &str = ".swag";

/// Table holding the upload settings inside the config document.
const SECTION: &str = "swagger";

/// Document uploaded when the config does not name one explicitly.
const DEFAULT_DOCUMENT: &str = "swagger.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("home directory could not be determined")]
    NoHomeDir,
    #[error("no .swag.yaml, .swag.yml or .swag found in {}", .0.display())]
    NotFound(PathBuf),
    #[error("unsupported config format for {} (expected .toml, .yaml, .yml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("read config {} failed: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config {} failed: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("missing key {0}")]
    MissingKey(String),
    #[error("key {key} must be {expected}")]
    InvalidType { key: String, expected: &'static str },
}

/// Serialization format of a config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    fn parse(self, contents: &str) -> Result<Value, String> {
        match self {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
        }
    }
}

/// Settings consumed by the uploader. Built once, then only read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadConfig {
    /// Import type understood by the server (e.g. `swagger`).
    pub doc_type: String,
    /// Config-level token, used when no per-request token is given.
    pub token: String,
    /// Document to upload.
    pub file: PathBuf,
    /// Merge mode forwarded as-is.
    pub merge: String,
    /// Base URL of the server, without the import path.
    pub server: String,
    pub timeout: Option<Duration>,
    pub fail_on_status: bool,
}

impl UploadConfig {
    /// Resolve the config file, read it and validate its `swagger` section.
    ///
    /// An empty `config_path` selects the per-user file in the home
    /// directory. `output_dir` is where the default document is looked for
    /// when `swagger.file_path` is absent.
    pub fn load(config_path: &str, output_dir: &Path) -> Result<Self, ConfigError> {
        let (path, format) = resolve_config_path(config_path)?;
        Self::load_file(&path, format, output_dir)
    }

    /// Read and validate `path`, parsed as `format`.
    pub fn load_file(
        path: &Path,
        format: ConfigFormat,
        output_dir: &Path,
    ) -> Result<Self, ConfigError> {
        info!("Using config file: {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document = format
            .parse(&contents)
            .map_err(|message| ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            })?;
        Self::from_document(&document, output_dir)
    }

    /// Validate an already parsed document.
    pub fn from_document(document: &Value, output_dir: &Path) -> Result<Self, ConfigError> {
        let section = match document.get(SECTION) {
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(ConfigError::InvalidType {
                    key: SECTION.to_string(),
                    expected: "a table",
                })
            }
            None => return Err(ConfigError::MissingKey(SECTION.to_string())),
        };

        let doc_type = required_str(section, "type")?;
        let server = required_str(section, "server")?;
        let token = optional_str(section, "token")?.unwrap_or_default();
        let file = match optional_str(section, "file_path")? {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => output_dir.join(DEFAULT_DOCUMENT),
        };
        let merge = optional_merge(section)?.unwrap_or_default();
        let timeout = optional_u64(section, "timeout")?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let fail_on_status = optional_bool(section, "fail_on_status")?.unwrap_or(false);

        debug!(
            doc_type = %doc_type,
            server = %server,
            file = %file.display(),
            merge = %merge,
            token_set = !token.is_empty(),
            "upload config loaded"
        );

        Ok(UploadConfig {
            doc_type,
            token,
            file,
            merge,
            server,
            timeout,
            fail_on_status,
        })
    }
}

/// Turn the `--config` flag into a concrete path and the format to parse
/// it with.
pub fn resolve_config_path(config_path: &str) -> Result<(PathBuf, ConfigFormat), ConfigError> {
    resolve_with_home(config_path, dirs::home_dir())
}

/// An explicit path takes its format from the extension; the home fallback
/// is always YAML.
pub fn resolve_with_home(
    config_path: &str,
    home: Option<PathBuf>,
) -> Result<(PathBuf, ConfigFormat), ConfigError> {
    if !config_path.is_empty() {
        let path = PathBuf::from(config_path);
        let format = ConfigFormat::from_path(&path)?;
        return Ok((path, format));
    }
    let home = home.ok_or(ConfigError::NoHomeDir)?;
    Ok((find_home_config(&home)?, ConfigFormat::Yaml))
}

/// Look for `.swag.yaml`, `.swag.yml`, then a bare `.swag`, in `home`.
pub fn find_home_config(home: &Path) -> Result<PathBuf, ConfigError> {
    [
        format!("{HOME_CONFIG_NAME}.yaml"),
        format!("{HOME_CONFIG_NAME}.yml"),
        HOME_CONFIG_NAME.to_string(),
    ]
    .iter()
    .map(|name| home.join(name))
    .find(|candidate| candidate.is_file())
    .ok_or_else(|| ConfigError::NotFound(home.to_path_buf()))
}

fn qualified(key: &str) -> String {
    format!("{SECTION}.{key}")
}

fn required_str(section: &Map<String, Value>, key: &str) -> Result<String, ConfigError> {
    optional_str(section, key)?.ok_or_else(|| ConfigError::MissingKey(qualified(key)))
}

fn optional_str(section: &Map<String, Value>, key: &str) -> Result<Option<String>, ConfigError> {
    match section.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ConfigError::InvalidType {
            key: qualified(key),
            expected: "a string",
        }),
    }
}

// merge is a string on the wire but config authors often write a bool
fn optional_merge(section: &Map<String, Value>) -> Result<Option<String>, ConfigError> {
    match section.get("merge") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(ConfigError::InvalidType {
            key: qualified("merge"),
            expected: "a string or a bool",
        }),
    }
}

fn optional_bool(section: &Map<String, Value>, key: &str) -> Result<Option<bool>, ConfigError> {
    match section.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ConfigError::InvalidType {
            key: qualified(key),
            expected: "a bool",
        }),
    }
}

fn optional_u64(section: &Map<String, Value>, key: &str) -> Result<Option<u64>, ConfigError> {
    match section.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or_else(|| ConfigError::InvalidType {
            key: qualified(key),
            expected: "a non-negative integer",
        }),
    }
}
