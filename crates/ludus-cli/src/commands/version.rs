//! `ludus version`

use ludus_core::{CLIENT_VERSION, LudusResult};
use tracing::{debug, info};

use super::Session;
use crate::console;

/// Print the client version and, with an API key, the server version
pub async fn execute(session: &Session) -> LudusResult<()> {
    info!("Ludus client v{}", CLIENT_VERSION);
    debug!(
        "Built for {} ({})",
        std::env::consts::OS,
        std::env::consts::ARCH
    );

    if session.api_key.is_none() {
        return Err(ludus_core::LudusError::config(
            "No API key. Cannot query server version.",
        ));
    }

    let client = session.client()?;
    let body = client.get("/").await?;
    if console::print_json_if_requested(session.json(), &body) {
        return Ok(());
    }
    console::print_generic_result(&body)
}
