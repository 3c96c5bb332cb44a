// Subcommand handlers. Each one turns parsed flags into the config object its
// backend needs, makes the single external call and reports the result.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::api::UploadClient;
use crate::cli::{InitArgs, UploadArgs};
use crate::config::UploadConfig;
use crate::error::CliError;
use crate::generator::{DocGenerator, GeneratorConfig, NamingStrategy};

/// Validate the `init` flags and hand them to `generator`.
///
/// The naming strategy is checked first so an unsupported value never
/// reaches the generator.
pub fn run_init(args: &InitArgs, generator: &dyn DocGenerator) -> Result<()> {
    let naming_strategy: NamingStrategy = args.property_strategy.parse()?;

    let config = GeneratorConfig {
        search_dir: args.search_dir.clone(),
        excludes: args
            .exclude
            .iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect(),
        main_api_file: args.general_info.clone(),
        naming_strategy,
        output_dir: args.output.clone(),
        parse_vendor: args.parse_vendor,
        parse_dependency: args.parse_dependency,
        markdown_files_dir: args.markdown_files.clone().filter(|p| !p.as_os_str().is_empty()),
        code_example_files_dir: args
            .code_example_files
            .clone()
            .filter(|p| !p.as_os_str().is_empty()),
        parse_internal: args.parse_internal,
        generated_time: args.generated_time,
        parse_depth: args.parse_depth,
    };
    info!(
        "generating docs from {} into {}",
        config.search_dir.display(),
        config.output_dir.display()
    );
    generator.build(&config)?;
    Ok(())
}

/// Load the upload config, send the document and write the response body
/// verbatim to `out`.
pub fn run_upload(args: &UploadArgs, out: &mut dyn Write) -> Result<()> {
    let config = UploadConfig::load(&args.config, &args.output).map_err(CliError::from)?;

    // flags win over the config file
    let timeout = args.timeout.map(Duration::from_secs).or(config.timeout);
    let mut client = UploadClient::new(&config, timeout)?;
    if let Some(token) = &args.token {
        client.set_token(token);
    }
    if args.fail_on_status {
        client.set_fail_on_status(true);
    }
    if !client.has_token() && config.token.is_empty() {
        warn!("no upload token configured; sending an empty token");
    }

    // A spinner on stderr while the request is in flight. Hidden when stderr
    // is not a terminal.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Uploading {}...", config.file.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = client.upload(&config);
    spinner.finish_and_clear();

    let response = result?;
    info!(status = %response.status, "upload finished");
    if !response.status.is_success() {
        warn!(status = %response.status, "server answered with a non-success status");
    }

    out.write_all(&response.body)
        .and_then(|_| out.write_all(b"\n"))
        .and_then(|_| out.flush())
        .context("failed to write response body")?;
    Ok(())
}
