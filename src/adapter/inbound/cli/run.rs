//! Handler for the `run` command.

use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::application::notice::describe_duration;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::load(&args.config)?;
    apply_overrides(&mut config, args, output::is_json());
    config.init_logging();

    if !output::is_quiet() && !output::is_json() {
        print_startup_config(&config);
    }

    info!(config = %args.config.display(), "freegames starting");
    bootstrap::run(config).await
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(config: &mut Config, args: &RunArgs, force_json_logs: bool) {
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if args.json_logs || force_json_logs {
        config.logging.format = "json".to_string();
    }
    if args.dry_run {
        config.dry_run = true;
    }
    if let Some(path) = &args.database {
        config.database = path.to_string_lossy().into_owned();
    }
}

fn print_startup_config(config: &Config) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Database", &config.database);
    output::field("Prefix", format!("{}freegames", config.discord.prefix));
    output::field("Cooldown", describe_duration(config.poller.cooldown()));
    if output::verbosity() > 0 {
        output::field("Deals API", &config.cheapshark.base_url);
        output::field("Interval", format!("{}s", config.poller.interval_secs));
    }

    if config.dry_run {
        output::warning("Dry-run mode enabled - deal notices will be logged, not posted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> RunArgs {
        RunArgs {
            config: PathBuf::from("config.toml"),
            log_level: None,
            dry_run: false,
            json_logs: false,
            database: None,
        }
    }

    #[test]
    fn no_flags_keep_the_file_values() {
        let mut config = Config::default();
        apply_overrides(&mut config, &args(), false);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(!config.dry_run);
        assert_eq!(config.database, "freegames.db");
    }

    #[test]
    fn flags_override_the_file() {
        let mut config = Config::default();
        let args = RunArgs {
            log_level: Some("debug".into()),
            dry_run: true,
            database: Some(PathBuf::from("/tmp/bot.db")),
            ..args()
        };
        apply_overrides(&mut config, &args, false);
        assert_eq!(config.logging.level, "debug");
        assert!(config.dry_run);
        assert_eq!(config.database, "/tmp/bot.db");
    }

    #[test]
    fn json_output_forces_json_logs() {
        let mut config = Config::default();
        apply_overrides(&mut config, &args(), true);
        assert_eq!(config.logging.format, "json");
    }
}
