// Command-line surface: one subcommand per handler, each with its own flag
// schema. Long flag names follow the generator's camelCase spelling.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Generate API docs with an external generator and upload them.
#[derive(Debug, Parser)]
#[command(name = "swag-cli", version, about, long_about = None)]
pub struct Options {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create docs.go, swagger.json and swagger.yaml
    #[command(visible_alias = "i")]
    Init(InitArgs),
    /// Upload swagger.json to the API management server
    #[command(visible_alias = "u")]
    Upload(UploadArgs),
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Go file path in which 'swagger general API Info' is written
    #[arg(
        short = 'g',
        long = "generalInfo",
        visible_alias = "generalInfoFile",
        default_value = "main.go"
    )]
    pub general_info: PathBuf,

    /// Directory you want to parse
    #[arg(short = 'd', long = "dir", visible_alias = "searchDir", default_value = "./")]
    pub search_dir: PathBuf,

    /// Exclude directories and files when searching, comma separated
    #[arg(long = "exclude", visible_alias = "excludeDirs", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Property naming strategy: camelcase, snakecase or pascalcase
    #[arg(
        short = 'p',
        long = "propertyStrategy",
        visible_alias = "propertyNamingStrategy",
        default_value = "camelcase"
    )]
    pub property_strategy: String,

    /// Output directory for all the generated files (swagger.json, swagger.yaml and doc.go)
    #[arg(short = 'o', long = "output", visible_alias = "outputDir", default_value = "./docs")]
    pub output: PathBuf,

    /// Parse go files in 'vendor' folder
    #[arg(long = "parseVendor")]
    pub parse_vendor: bool,

    /// Parse go files in outside dependency folder
    #[arg(long = "parseDependency")]
    pub parse_dependency: bool,

    /// Folder containing markdown files to use as description
    #[arg(long = "markdownFiles", visible_aliases = ["md", "markdownDir"])]
    pub markdown_files: Option<PathBuf>,

    /// Folder containing code example files for the x-codeSamples extension
    #[arg(long = "codeExampleFiles", visible_aliases = ["cef", "codeExampleDir"])]
    pub code_example_files: Option<PathBuf>,

    /// Parse go files in internal packages
    #[arg(long = "parseInternal")]
    pub parse_internal: bool,

    /// Generate timestamp at the top of docs.go
    #[arg(long = "generatedTime")]
    pub generated_time: bool,

    /// Dependency parse depth
    #[arg(long = "parseDepth", default_value_t = 100, allow_negative_numbers = true)]
    pub parse_depth: i32,

    /// Generator executable to run
    #[arg(long, env = "SWAG_GENERATOR", default_value = "swag")]
    pub generator: String,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Upload config file; an empty value falls back to ~/.swag.yaml, ~/.swag.yml or ~/.swag
    #[arg(
        short = 'c',
        long = "config",
        visible_alias = "configFilePath",
        default_value = "./config/swag.toml"
    )]
    pub config: String,

    /// Directory holding swagger.json when the config names no file
    #[arg(short = 'o', long = "output", visible_alias = "outputDir", default_value = "./docs")]
    pub output: PathBuf,

    /// Token for this upload; overrides swagger.token when non-empty
    #[arg(long, env = "SWAG_UPLOAD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Give up on the request after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Exit with an error when the server answers with a non-2xx status
    #[arg(long = "fail-on-status")]
    pub fail_on_status: bool,
}
