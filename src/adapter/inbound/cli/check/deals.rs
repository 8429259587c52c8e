//! Live fetch against the deals API.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{config_or_default, output};
use crate::adapter::outbound::cheapshark::CheapSharkClient;
use crate::domain::{Deal, Storefront};
use crate::error::{ConfigError, Result};
use crate::port::DealSource;

/// How many deals to list in the human-readable output.
const SHOWN: usize = 5;

/// Fetch current free deals and print the top ones.
pub async fn execute_deals(config_path: &Path, stores: Option<&str>) -> Result<()> {
    let config = config_or_default(config_path)?;
    let stores = parse_stores(stores)?;
    let client = CheapSharkClient::from_config(&config.cheapshark)?;
    let redirect = config.cheapshark.redirect_url.as_str();

    let names = stores
        .iter()
        .map(|store| store.display_name())
        .collect::<Vec<_>>()
        .join(", ");
    let pb = output::spinner(&format!("Fetching free deals from {}", client.source_name()));

    let deals = match client.free_deals(&stores).await {
        Ok(deals) => {
            output::spinner_success(&pb, &format!("Fetched {} deal(s)", deals.len()));
            deals
        }
        Err(err) => {
            output::spinner_fail(&pb, &format!("Failed to fetch deals: {err}"));
            return Err(err);
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "check.deals",
            "stores": stores.iter().map(|s| s.command()).collect::<Vec<_>>(),
            "deals": deals.iter().map(|deal| deal_json(deal, redirect)).collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    output::section("Free Deals");
    output::field("Stores", names);

    let Some(top) = deals.first() else {
        output::note("No free games found at the moment.");
        return Ok(());
    };

    output::field("Top deal", output::highlight(&top.title));
    output::field("Store", top.store_name());
    output::field("Link", top.link(redirect));

    if deals.len() > 1 {
        output::section("Also free");
        for deal in deals.iter().skip(1).take(SHOWN - 1) {
            output::note(&format!("{} ({})", deal.title, deal.store_name()));
        }
        if deals.len() > SHOWN {
            output::note(&format!("... and {} more", deals.len() - SHOWN));
        }
    }

    if output::verbosity() > 0 {
        output::hint("the bot posts only the first deal of each check");
    }
    Ok(())
}

/// Parse a comma-separated store list; `None` selects every store.
fn parse_stores(raw: Option<&str>) -> Result<Vec<Storefront>> {
    let Some(raw) = raw else {
        return Ok(Storefront::ALL.to_vec());
    };

    let mut stores = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        let store = Storefront::from_command(name).ok_or_else(|| ConfigError::InvalidValue {
            field: "stores",
            reason: format!("unknown store \"{name}\""),
        })?;
        if !stores.contains(&store) {
            stores.push(store);
        }
    }

    if stores.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "stores",
            reason: "no stores given".to_string(),
        }
        .into());
    }
    stores.sort();
    Ok(stores)
}

fn deal_json(deal: &Deal, redirect: &str) -> serde_json::Value {
    json!({
        "id": deal.id.as_str(),
        "title": deal.title,
        "store": deal.store_name(),
        "link": deal.link(redirect),
    })
}
