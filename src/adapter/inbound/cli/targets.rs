//! Handler for the `targets` command.

use std::path::Path;

use chrono::DateTime;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite::database::connection::open;
use crate::adapter::outbound::sqlite::SqliteTargetStore;
use crate::domain::{Storefront, Target};
use crate::error::Result;
use crate::port::TargetStore;

#[derive(Tabled)]
struct TargetRow {
    #[tabled(rename = "Guild")]
    guild: String,
    #[tabled(rename = "Enabled")]
    enabled: &'static str,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Stores")]
    stores: String,
    #[tabled(rename = "Ping role")]
    ping_role: String,
    #[tabled(rename = "Last post")]
    last_check: String,
    #[tabled(rename = "Last deal")]
    last_deal: String,
}

impl From<&Target> for TargetRow {
    fn from(target: &Target) -> Self {
        Self {
            guild: target.guild.to_string(),
            enabled: if target.enabled { "yes" } else { "no" },
            channel: target.channel.map_or_else(|| "-".into(), |c| c.to_string()),
            stores: enabled_stores(target),
            ping_role: target.ping_role.map_or_else(|| "-".into(), |r| r.to_string()),
            last_check: format_timestamp(target.last_check),
            last_deal: target
                .last_posted_deal
                .as_ref()
                .map_or_else(|| "-".into(), |d| d.to_string()),
        }
    }
}

fn enabled_stores(target: &Target) -> String {
    let names: Vec<&str> = target
        .stores
        .enabled()
        .into_iter()
        .map(Storefront::command)
        .collect();
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(",")
    }
}

fn format_timestamp(ts: i64) -> String {
    if ts <= 0 {
        return "never".to_string();
    }
    DateTime::from_timestamp(ts, 0)
        .map_or_else(|| ts.to_string(), |at| at.format("%Y-%m-%d %H:%M UTC").to_string())
}

fn target_json(target: &Target) -> serde_json::Value {
    json!({
        "guild_id": target.guild.to_string(),
        "enabled": target.enabled,
        "channel_id": target.channel.map(|c| c.to_string()),
        "stores": target.stores.enabled().into_iter().map(Storefront::command).collect::<Vec<_>>(),
        "ping_role_id": target.ping_role.map(|r| r.to_string()),
        "last_check": target.last_check,
        "last_deal_id": target.last_posted_deal.as_ref().map(|d| d.as_str().to_string()),
        "eligible": target.is_eligible(),
    })
}

/// Execute the targets command.
pub async fn execute(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        if output::is_json() {
            output::json_output(json!({
                "command": "targets",
                "database": db_path.display().to_string(),
                "status": "missing_database",
            }));
        } else {
            output::warning(&format!("Database not found ({})", db_path.display()));
            output::hint("run `freegames run` to create it");
        }
        return Ok(());
    }

    let pool = open(&db_path.to_string_lossy())?;
    let targets = SqliteTargetStore::new(pool).list().await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "targets",
            "database": db_path.display().to_string(),
            "status": "ok",
            "targets": targets.iter().map(target_json).collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Database", db_path.display());
    output::section("Targets");

    if targets.is_empty() {
        output::note("No guild has configured the bot yet.");
        return Ok(());
    }

    let rows: Vec<TargetRow> = targets.iter().map(TargetRow::from).collect();
    output::lines(&Table::new(rows).to_string());

    let eligible = targets.iter().filter(|t| t.is_eligible()).count();
    output::field("Eligible", format!("{eligible} of {}", targets.len()));
    Ok(())
}
