use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{diagnostic, output};
use crate::application::notice::describe_duration;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::discord::{DiscordAppConfig, TOKEN_ENV};
use crate::infrastructure::config::settings::Config;

/// Validate configuration file without starting the bot.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

    let config = match Config::parse_toml(&content) {
        Ok(config) => config,
        Err(Error::Config(ConfigError::Parse(err))) => {
            report_parse_error(path, &content, &err);
            return Err(ConfigError::Parse(err).into());
        }
        Err(err) => return Err(err),
    };

    let token_present = DiscordAppConfig::token_from_env().is_some();

    if output::is_json() {
        output::json_output(json!({
            "command": "check.config",
            "config": path.display().to_string(),
            "valid": true,
            "summary": summary_json(&config, token_present),
        }));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Database", &config.database);
    output::field("Prefix", format!("{}freegames", config.discord.prefix));
    output::field("Deals API", &config.cheapshark.base_url);
    let interval = i64::try_from(config.poller.interval_secs).unwrap_or(i64::MAX);
    output::field("Interval", describe_duration(interval));
    output::field("Cooldown", describe_duration(config.poller.cooldown()));
    output::field("Dedupe", config.poller.dedupe_on_enable);
    output::field("Dry run", config.dry_run);
    if output::verbosity() > 0 {
        output::field("Redirect", &config.cheapshark.redirect_url);
        output::field("Timeout", format!("{} ms", config.cheapshark.timeout_ms));
        output::field(
            "Log",
            format!("{} ({})", config.logging.level, config.logging.format),
        );
    }

    if token_present {
        output::success("Discord token detected");
    } else if config.dry_run {
        output::warning(&format!(
            "{TOKEN_ENV} is not set; dry run will poll without chat commands"
        ));
    } else {
        output::warning(&format!(
            "{TOKEN_ENV} is not set (required unless dry_run = true)"
        ));
    }

    output::success("Configuration check complete");
    Ok(())
}

fn summary_json(config: &Config, token_present: bool) -> serde_json::Value {
    json!({
        "database": config.database,
        "prefix": config.discord.prefix,
        "base_url": config.cheapshark.base_url,
        "interval_secs": config.poller.interval_secs,
        "cooldown_secs": config.poller.cooldown_secs,
        "dedupe_on_enable": config.poller.dedupe_on_enable,
        "dry_run": config.dry_run,
        "token_present": token_present,
    })
}

fn report_parse_error(path: &Path, content: &str, err: &toml::de::Error) {
    if output::is_json() {
        return;
    }
    match diagnostic::ConfigError::from_toml(content, err) {
        Some(diagnostic) => {
            output::error(&format!("{} is not valid TOML", path.display()));
            eprintln!("{:?}", miette::Report::new(diagnostic));
        }
        None => output::error(&err.to_string()),
    }
}
