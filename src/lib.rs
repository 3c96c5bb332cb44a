// Library root
// -----------
// This crate exposes the pieces behind the `swag-cli` binary so they can be
// tested without spawning a process.
//
// Module responsibilities:
// - `cli`: flag schemas for the `init` and `upload` subcommands.
// - `commands`: handlers that turn parsed flags into one external call.
// - `generator`: naming-strategy validation and the bridge to the external
//   documentation generator.
// - `config`: typed loading of the upload settings file.
// - `api`: the blocking HTTP client that posts the document.
// - `error`: the error taxonomy shared by the handlers.
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod generator;

pub use error::CliError;
