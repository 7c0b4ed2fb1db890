//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands::{self, Session};
use ludus_core::{ClientSettings, LudusResult};
use tracing::debug;

/// Route the command to its handler
pub async fn route(cli: Cli, settings: ClientSettings) -> LudusResult<()> {
    if let Some(path) = &settings.config_file {
        debug!("Using config file: {}", path.display());
    }
    let session = Session::resolve(settings)?;

    match cli.command {
        Commands::Version => commands::version::execute(&session).await,
        Commands::Apikey => commands::apikey::execute(&session).await,
        Commands::Power { action } => commands::power::execute(&session, action).await,
        Commands::Range { action } => commands::range::execute(&session, action).await,
        Commands::Users { action } => commands::users::execute(&session, action).await,
    }
}
