//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the Discord token only ever comes
//! from the `DISCORD_TOKEN` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use freegames::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::discord::DiscordAppConfig;
use super::logging::LoggingConfig;
use super::poller::PollerConfig;
use crate::adapter::outbound::cheapshark::CheapSharkConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; an empty file yields a working default setup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to SQLite database file.
    ///
    /// Defaults to "freegames.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Log deal notices instead of posting them to Discord.
    #[serde(default)]
    pub dry_run: bool,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Discord bot settings.
    #[serde(default)]
    pub discord: DiscordAppConfig,

    /// Deals API endpoint and HTTP limits.
    #[serde(default)]
    pub cheapshark: CheapSharkConfig,

    /// Poll cadence and cooldown.
    #[serde(default)]
    pub poller: PollerConfig,
}

fn default_database_path() -> String {
    "freegames.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            dry_run: false,
            logging: LoggingConfig::default(),
            discord: DiscordAppConfig::default(),
            cheapshark: CheapSharkConfig::default(),
            poller: PollerConfig::default(),
        }
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

fn validate_http_url(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField { field }.into());
    }
    let url = Url::parse(value).map_err(|e| invalid(field, &e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(field, "must be an http or https URL"));
    }
    Ok(())
}

impl Config {
    /// Parse and validate configuration from TOML text.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(invalid("format", "must be \"pretty\" or \"json\""));
        }

        let prefix = &self.discord.prefix;
        if prefix.is_empty() {
            return Err(invalid("prefix", "must not be empty"));
        }
        if prefix.chars().any(char::is_whitespace) {
            return Err(invalid("prefix", "must not contain whitespace"));
        }

        validate_http_url("base_url", &self.cheapshark.base_url)?;
        validate_http_url("redirect_url", &self.cheapshark.redirect_url)?;
        if self.cheapshark.timeout_ms == 0 {
            return Err(invalid("timeout_ms", "must be greater than 0"));
        }
        if self.cheapshark.connect_timeout_ms == 0 {
            return Err(invalid("connect_timeout_ms", "must be greater than 0"));
        }

        if self.poller.interval_secs == 0 {
            return Err(invalid("interval_secs", "must be greater than 0"));
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
