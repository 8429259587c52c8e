//! CLI module graph and command dispatch.

pub mod check;
pub mod command;
pub mod diagnostic;
pub mod output;
pub mod paths;
pub mod run;
pub mod targets;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

use command::{CheckCommand, Cli, Commands};

/// Apply global flags and run the selected subcommand.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(
        output::OutputConfig::new(cli.json, cli.quiet, cli.verbose),
        &cli.color,
    );

    match cli.command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Check(CheckCommand::Config(arg)) => check::config::execute_config(&arg.config),
        Commands::Check(CheckCommand::Deals(args)) => {
            check::deals::execute_deals(&args.config, args.stores.as_deref()).await
        }
        Commands::Targets(args) => {
            let db = match args.db {
                Some(db) => db,
                None => PathBuf::from(config_or_default(&args.config)?.database),
            };
            targets::execute(&db).await
        }
    }
}

/// Load the configuration at `path`, or the defaults if the file is absent.
///
/// A file that exists but fails to parse or validate is still an error.
pub fn config_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load(path)
    } else {
        Ok(Config::default())
    }
}
