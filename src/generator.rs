// Bridge to the external documentation generator.
// The `init` handler validates its flags into a `GeneratorConfig` and hands
// it to a `DocGenerator`. The shipped implementation runs a generator
// executable with the settings forwarded as flags.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use std::str::FromStr;

use tracing::{debug, info};

use crate::error::CliError;

/// Property casing applied to generated schema field names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamingStrategy {
    CamelCase,
    SnakeCase,
    PascalCase,
}

impl NamingStrategy {
    /// Spelling understood by the generator.
    pub fn as_str(self) -> &'static str {
        match self {
            NamingStrategy::CamelCase => "camelcase",
            NamingStrategy::SnakeCase => "snakecase",
            NamingStrategy::PascalCase => "pascalcase",
        }
    }
}

impl fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamingStrategy {
    type Err = CliError;

    /// Accepts the generator's lowercase names and the conventional
    /// spellings (`camelCase`, `snake_case`, `PascalCase`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camelcase" | "camelCase" => Ok(NamingStrategy::CamelCase),
            "snakecase" | "snake_case" => Ok(NamingStrategy::SnakeCase),
            "pascalcase" | "PascalCase" => Ok(NamingStrategy::PascalCase),
            other => Err(CliError::Validation(format!(
                "not supported {other} propertyStrategy"
            ))),
        }
    }
}

/// Everything the generator needs for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub search_dir: PathBuf,
    pub excludes: Vec<String>,
    pub main_api_file: PathBuf,
    pub naming_strategy: NamingStrategy,
    pub output_dir: PathBuf,
    pub parse_vendor: bool,
    pub parse_dependency: bool,
    pub markdown_files_dir: Option<PathBuf>,
    pub code_example_files_dir: Option<PathBuf>,
    pub parse_internal: bool,
    pub generated_time: bool,
    pub parse_depth: i32,
}

impl GeneratorConfig {
    /// Render the config as `init` arguments for the generator executable.
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "init".into(),
            "--dir".into(),
            self.search_dir.clone().into(),
            "--generalInfo".into(),
            self.main_api_file.clone().into(),
            "--propertyStrategy".into(),
            self.naming_strategy.as_str().into(),
            "--output".into(),
            self.output_dir.clone().into(),
        ];
        if !self.excludes.is_empty() {
            args.push("--exclude".into());
            args.push(self.excludes.join(",").into());
        }
        if let Some(dir) = &self.markdown_files_dir {
            args.push("--markdownFiles".into());
            args.push(dir.clone().into());
        }
        if let Some(dir) = &self.code_example_files_dir {
            args.push("--codeExampleFiles".into());
            args.push(dir.clone().into());
        }
        for (enabled, flag) in [
            (self.parse_vendor, "--parseVendor"),
            (self.parse_dependency, "--parseDependency"),
            (self.parse_internal, "--parseInternal"),
            (self.generated_time, "--generatedTime"),
        ] {
            if enabled {
                args.push(flag.into());
            }
        }
        args.push("--parseDepth".into());
        args.push(self.parse_depth.to_string().into());
        args
    }
}

/// Something that turns annotated sources into an API document.
pub trait DocGenerator {
    fn build(&self, config: &GeneratorConfig) -> Result<(), CliError>;
}

/// Runs a generator executable found on `PATH` (or at an explicit path).
pub struct ExternalGenerator {
    program: OsString,
}

impl ExternalGenerator {
    pub fn new(program: impl Into<OsString>) -> Self {
        ExternalGenerator {
            program: program.into(),
        }
    }
}

impl DocGenerator for ExternalGenerator {
    fn build(&self, config: &GeneratorConfig) -> Result<(), CliError> {
        let args = config.to_args();
        let program = self.program.to_string_lossy().into_owned();
        debug!(program = %program, ?args, "running generator");

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| CliError::Generator(format!("failed to run {program}: {e}")))?;
        if !status.success() {
            return Err(CliError::Generator(format!("{program} exited with {status}")));
        }
        info!("docs generated in {}", config.output_dir.display());
        Ok(())
    }
}
