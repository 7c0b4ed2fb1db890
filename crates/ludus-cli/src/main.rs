//! Ludus CLI application
//!
//! Controls a Ludus server over its REST API: range status, deployment,
//! configuration and VM power.
//!
//! # Configuration
//!
//! Flags override `LUDUS_*` environment variables, which override
//! `$HOME/.config/ludus/config.yml`. The API key comes from
//! `LUDUS_API_KEY` or from the key stored with `ludus apikey`.

mod args;
mod commands;
mod console;
mod router;

use args::Cli;
use clap::Parser;
use ludus_core::ClientSettings;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = ClientSettings::load(cli.config.as_deref(), cli.overrides());

    // Set RUST_LOG to override the level chosen by --verbose
    let verbose = settings
        .as_ref()
        .map(|s| s.verbose)
        .unwrap_or(cli.verbose.unwrap_or(false));
    ludus_core::logging::init_logging(verbose);

    let result = match settings {
        Ok(settings) => router::route(cli, settings).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
