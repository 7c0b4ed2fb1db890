//! `ludus users ...`

use ludus_core::LudusResult;
use ludus_core::models::UserObject;

use super::Session;
use crate::args::UsersAction;
use crate::console;

pub async fn execute(session: &Session, action: UsersAction) -> LudusResult<()> {
    match action {
        UsersAction::List { scope } => list(session, scope.is_some()).await,
    }
}

async fn list(session: &Session, all: bool) -> LudusResult<()> {
    let client = session.client()?;
    let path = if all {
        "/user/all".to_string()
    } else {
        session.scoped("/user")
    };
    let body = client.get(&path).await?;
    if console::print_json_if_requested(session.json(), &body) {
        return Ok(());
    }

    let users: Vec<UserObject> = serde_json::from_slice(&body)?;
    println!("{}", console::user_table(&users));
    Ok(())
}
