//! `ludus power on|off`

use ludus_core::LudusResult;
use ludus_core::models::PowerBody;

use super::Session;
use crate::args::PowerAction;
use crate::console;

/// API path for a power action
pub fn power_path(action: &PowerAction) -> &'static str {
    match action {
        PowerAction::On { .. } => "/range/poweron",
        PowerAction::Off { .. } => "/range/poweroff",
    }
}

pub async fn execute(session: &Session, action: PowerAction) -> LudusResult<()> {
    let names = match &action {
        PowerAction::On { name } | PowerAction::Off { name } => name,
    };
    let payload = PowerBody::from_names(names);

    let client = session.client()?;
    let body = client
        .put_serialized(&session.scoped(power_path(&action)), &payload)
        .await?;
    if console::print_json_if_requested(session.json(), &body) {
        return Ok(());
    }
    console::print_generic_result(&body)
}
