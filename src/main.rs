// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, parse flags, hand off to a handler.
// - Returns `anyhow::Result` so any handler error ends the process with the
//   error chain on stderr and a nonzero exit status.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use swag_cli::cli::{Command, Options};
use swag_cli::commands::{run_init, run_upload};
use swag_cli::generator::ExternalGenerator;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout only carries the server's response.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let options = Options::parse();
    match options.command {
        Command::Init(args) => {
            let generator = ExternalGenerator::new(&args.generator);
            run_init(&args, &generator)
        }
        Command::Upload(args) => run_upload(&args, &mut std::io::stdout().lock()),
    }
}
