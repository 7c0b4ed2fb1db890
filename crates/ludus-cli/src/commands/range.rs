//! `ludus range ...`

use console::Term;
use ludus_core::models::{DeployBody, GenericResult, RangeObject};
use ludus_core::rest::user_from_api_key;
use ludus_core::{LudusError, LudusResult};
use std::path::Path;

use super::{Session, scoped_path};
use crate::args::{RangeAction, RangeConfigAction};
use crate::console as out;

pub async fn execute(session: &Session, action: RangeAction) -> LudusResult<()> {
    match action {
        RangeAction::List { scope } => list(session, scope.is_some()).await,
        RangeAction::Config { action } => match action {
            RangeConfigAction::Get => config_get(session).await,
            RangeConfigAction::Set { file, force } => config_set(session, &file, force).await,
        },
        RangeAction::Deploy {
            tags,
            force,
            verbose_ansible,
            only_roles,
            limit,
        } => {
            let body = DeployBody {
                tags,
                force,
                verbose: verbose_ansible,
                only_roles: split_roles(&only_roles),
                limit,
            };
            deploy(session, &body).await
        }
        RangeAction::Logs { tail } => logs(session, tail).await,
        RangeAction::Abort => abort(session).await,
        RangeAction::Rm { no_prompt } => remove(session, no_prompt).await,
        RangeAction::Rdp { output } => rdp(session, &output).await,
    }
}

/// Comma separated role names, dropping empty entries
pub fn split_roles(roles: &str) -> Vec<String> {
    roles
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

async fn list(session: &Session, all: bool) -> LudusResult<()> {
    let client = session.client()?;
    let path = if all {
        "/range/all".to_string()
    } else {
        session.scoped("/range")
    };
    let body = client.get(&path).await?;
    if out::print_json_if_requested(session.json(), &body) {
        return Ok(());
    }

    let tables = if all {
        let ranges: Vec<RangeObject> = serde_json::from_slice(&body)?;
        out::range_tables(&ranges, false)
    } else {
        let range: RangeObject = serde_json::from_slice(&body)?;
        out::range_tables(std::slice::from_ref(&range), true)
    };
    for table in tables {
        println!("{table}");
    }
    Ok(())
}

async fn config_get(session: &Session) -> LudusResult<()> {
    let client = session.client()?;
    let body = client.get(&session.scoped("/range/config")).await?;
    if out::print_json_if_requested(session.json(), &body) {
        return Ok(());
    }
    let config = GenericResult::from_slice(&body)?;
    print!("{}", config.result);
    Ok(())
}

async fn config_set(session: &Session, file: &Path, force: bool) -> LudusResult<()> {
    let content = std::fs::read(file).map_err(|e| {
        LudusError::io_with_path(format!("Could not read: {e}"), file.display().to_string())
    })?;

    let client = session.client()?;
    let body = client
        .put_file_with_force(&session.scoped("/range/config"), content, "file", force)
        .await?;
    if out::print_json_if_requested(session.json(), &body) {
        return Ok(());
    }
    out::print_generic_result(&body)
}

async fn deploy(session: &Session, body: &DeployBody) -> LudusResult<()> {
    let client = session.client()?;
    let response = client
        .post_serialized(&session.scoped("/range/deploy"), body)
        .await?;
    if out::print_json_if_requested(session.json(), &response) {
        return Ok(());
    }
    out::print_generic_result(&response)
}

async fn logs(session: &Session, tail: Option<u32>) -> LudusResult<()> {
    let path = match tail {
        Some(tail) if tail > 0 => format!("/range/logs?tail={tail}"),
        _ => "/range/logs".to_string(),
    };

    let client = session.client()?;
    let body = client.get(&session.scoped(&path)).await?;
    if out::print_json_if_requested(session.json(), &body) {
        return Ok(());
    }
    let logs = GenericResult::from_slice(&body)?;
    print!("{}", logs.result);
    Ok(())
}

async fn abort(session: &Session) -> LudusResult<()> {
    let client = session.client()?;
    let body = client.post_json(&session.scoped("/range/abort"), "").await?;
    if out::print_json_if_requested(session.json(), &body) {
        return Ok(());
    }
    out::print_generic_result(&body)
}

async fn remove(session: &Session, no_prompt: bool) -> LudusResult<()> {
    let client = session.client()?;
    let target = match session.settings.user.as_deref().filter(|u| !u.is_empty()) {
        Some(user) => user.to_string(),
        None => session
            .api_key
            .as_deref()
            .map(user_from_api_key)
            .unwrap_or_default()
            .to_string(),
    };

    if !no_prompt {
        if !Term::stderr().is_term() {
            return Err(LudusError::config(
                "Refusing to destroy a range without a terminal; pass --no-prompt",
            ));
        }
        out::warn_banner(&format!(
            "!!! This will destroy all VMs for the range of user ID: {target} !!!"
        ));
        if !out::confirm("Do you want to continue?")? {
            return Err(LudusError::config("Bailing!"));
        }
    }

    let body = client.delete(&scoped_path("/range", Some(&target))).await?;
    if out::print_json_if_requested(session.json(), &body) {
        return Ok(());
    }
    out::print_generic_result(&body)
}

async fn rdp(session: &Session, output: &Path) -> LudusResult<()> {
    let client = session.client()?;
    client
        .download_to_file(&session.scoped("/range/rdpconfigs"), output)
        .await
}
