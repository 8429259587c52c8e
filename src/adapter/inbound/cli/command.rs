//! Command-line interface definitions.
//!
//! Defines the CLI structure for the freegames bot using `clap`. The CLI can
//! run the bot, validate configuration, try the deals API and inspect the
//! persisted per-guild targets.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Free game deal notifier for Discord
#[derive(Parser, Debug)]
#[command(name = "freegames")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the freegames CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Discord bot and the deal poller (foreground)
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// List persisted per-guild targets
    Targets(TargetsArgs),
}

/// Subcommands for `freegames check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
    /// Fetch current free deals from the deals API.
    Deals(CheckDealsArgs),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
///
/// Optional fields override the corresponding configuration file values.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log deal notices instead of posting them.
    #[arg(long)]
    pub dry_run: bool,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,

    /// Override the SQLite database path.
    #[arg(long)]
    pub database: Option<PathBuf>,
}

/// Arguments for `check deals`.
#[derive(Parser, Debug)]
pub struct CheckDealsArgs {
    /// Path to the configuration file (defaults apply if it does not exist).
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Comma-separated stores to query (e.g. "steam,gog"). Defaults to all.
    #[arg(long)]
    pub stores: Option<String>,
}

/// Arguments for the `targets` subcommand.
#[derive(Parser, Debug)]
pub struct TargetsArgs {
    /// Path to the SQLite database file. Defaults to the configured database.
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Path to the configuration file used to find the database.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}
