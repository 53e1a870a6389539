//
// main.rs
// dcm2jpeg
//
// Binary entry point: sets up logging, parses arguments and hands off to the CLI layer.
//

use clap::Parser;
use dcm2jpeg::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // An invalid root surfaces here as an error, which exits with status 1.
    cli::run(&cli)?;
    Ok(())
}
