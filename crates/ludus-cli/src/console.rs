//! CLI console utilities

use chrono::{DateTime, Local, Utc};
use colored::*;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use dialoguer::{Confirm, Password, theme::ColorfulTheme};
use ludus_core::models::{GenericResult, RangeObject, UserObject};
use ludus_core::{LudusError, LudusResult};
use tracing::info;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render a server timestamp in local time
pub fn format_time(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local).format(TIME_FORMAT).to_string()
}

/// Print the raw body when `--json` is set; returns whether it did
pub fn print_json_if_requested(json: bool, body: &[u8]) -> bool {
    if json {
        println!("{}", String::from_utf8_lossy(body));
    }
    json
}

/// Log the `result` field of a `{"result": "..."}` response
pub fn print_generic_result(body: &[u8]) -> LudusResult<()> {
    let parsed = GenericResult::from_slice(body)?;
    info!("{}", parsed.result);
    Ok(())
}

/// Ask a yes/no question, defaulting to no
pub fn confirm(prompt: &str) -> LudusResult<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| LudusError::io(e.to_string()))
}

/// Read a secret without echoing it
pub fn read_secret(prompt: &str) -> LudusResult<String> {
    Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()
        .map_err(|e| LudusError::io(e.to_string()))
}

fn state_color(state: &str) -> Option<Color> {
    match state {
        "DEPLOYING" | "DESTROYING" => Some(Color::Yellow),
        "ERROR" | "ABORTED" => Some(Color::Red),
        "SUCCESS" | "DESTROYED" => Some(Color::Green),
        _ => None,
    }
}

fn styled(text: impl Into<String>, color: Option<Color>) -> Cell {
    let cell = Cell::new(text.into());
    match color {
        Some(color) => cell.fg(color).add_attribute(Attribute::Bold),
        None => cell,
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(*h).add_attribute(Attribute::Bold)));
    table
}

/// Build the range summary table, optionally followed by its VMs
pub fn range_tables(ranges: &[RangeObject], with_vms: bool) -> Vec<Table> {
    let mut tables = Vec::new();

    let mut summary = new_table(&[
        "User ID",
        "Range Network",
        "Last Deployment",
        "Number of VMs",
        "Deployment Status",
        "Testing Enabled",
    ]);
    for range in ranges {
        let testing_color = if range.testing_enabled {
            Color::Green
        } else {
            Color::Red
        };
        summary.add_row(vec![
            Cell::new(&range.user_id),
            Cell::new(range.network()),
            Cell::new(format_time(&range.last_deployment)),
            Cell::new(range.number_of_vms),
            styled(&range.range_state, state_color(&range.range_state)),
            styled(
                range.testing_enabled.to_string().to_uppercase(),
                Some(testing_color),
            ),
        ]);
    }
    tables.push(summary);

    if with_vms {
        for range in ranges {
            let mut vms = new_table(&["Proxmox ID", "VM Name", "Power", "IP"]);
            for vm in &range.vms {
                let power = if vm.powered_on { "On" } else { "Off" };
                vms.add_row(vec![
                    Cell::new(vm.proxmox_id),
                    Cell::new(&vm.name),
                    Cell::new(power),
                    Cell::new(&vm.ip),
                ]);
            }
            tables.push(vms);
        }
    }

    tables
}

/// Build the user table
pub fn user_table(users: &[UserObject]) -> Table {
    let mut table = new_table(&["Name", "userID", "Created", "Last Active", "Admin"]);
    for user in users {
        table.add_row(vec![
            Cell::new(&user.name),
            Cell::new(&user.user_id),
            Cell::new(format_time(&user.date_created)),
            Cell::new(format_time(&user.date_last_active)),
            styled(
                user.is_admin.to_string().to_uppercase(),
                user.is_admin.then_some(Color::Green),
            ),
        ]);
    }
    table
}

/// Print a warning banner to stderr
pub fn warn_banner(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
}
