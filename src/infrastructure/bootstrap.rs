//! Infrastructure bootstrap helpers for runtime wiring.
//!
//! Composition root: builds the adapters from configuration, wires them into
//! the application services and runs the bot until ctrl-c.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::adapter::outbound::cheapshark::CheapSharkClient;
use crate::adapter::outbound::memory::MemoryTargetStore;
#[cfg(feature = "discord")]
use crate::adapter::outbound::notifier::discord::{run_gateway, DiscordHandler, DiscordNotifier};
use crate::adapter::outbound::sqlite::database::connection::open;
use crate::adapter::outbound::sqlite::SqliteTargetStore;
use crate::application::{CommandService, DealCheck, NoticeFormatter, Poller};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::discord::{DiscordAppConfig, TOKEN_ENV};
use crate::infrastructure::config::settings::Config;
use crate::port::{DealSource, LogNotifier, Notifier, TargetStore};

/// Application services wired over a set of adapters.
pub struct Services {
    pub store: Arc<dyn TargetStore>,
    pub check: Arc<DealCheck>,
    pub commands: Arc<CommandService>,
    pub poller: Poller,
}

/// `database` value that selects the process-local store.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Open the SQLite target store, creating and migrating it if needed.
///
/// [`IN_MEMORY_DATABASE`] selects a [`MemoryTargetStore`] instead; its
/// settings are lost on exit.
pub fn build_store(config: &Config) -> Result<Arc<dyn TargetStore>> {
    if config.database == IN_MEMORY_DATABASE {
        warn!("Using the in-memory target store, settings are not persisted");
        return Ok(Arc::new(MemoryTargetStore::new()));
    }

    let pool = open(&config.database)?;
    info!(database = %config.database, "Target store ready");
    Ok(Arc::new(SqliteTargetStore::new(pool)))
}

/// Build the CheapShark deal source.
pub fn build_source(config: &Config) -> Result<Arc<dyn DealSource>> {
    Ok(Arc::new(CheapSharkClient::from_config(&config.cheapshark)?))
}

/// Build the notifier: Discord when a token is available, a logging stand-in
/// in dry-run mode or without Discord support.
pub fn build_notifier(config: &Config, token: Option<&str>) -> Arc<dyn Notifier> {
    if config.dry_run {
        info!("Dry run: deal notices are logged, not posted");
        return Arc::new(LogNotifier);
    }

    #[cfg(feature = "discord")]
    if let Some(token) = token {
        return Arc::new(DiscordNotifier::from_token(token));
    }

    #[cfg(not(feature = "discord"))]
    let _ = token;

    warn!("No Discord notifier available, deal notices are logged");
    Arc::new(LogNotifier)
}

/// Wire the application services over the given adapters.
pub fn wire(
    config: &Config,
    store: Arc<dyn TargetStore>,
    source: Arc<dyn DealSource>,
    notifier: Arc<dyn Notifier>,
) -> Services {
    let cooldown = config.poller.cooldown();
    let formatter = NoticeFormatter::new(
        config.cheapshark.redirect_url.clone(),
        config.discord.prefix.clone(),
        cooldown,
    );
    let check = Arc::new(DealCheck::new(
        source,
        notifier,
        Arc::clone(&store),
        formatter,
        cooldown,
    ));
    let commands = Arc::new(CommandService::new(
        Arc::clone(&store),
        Arc::clone(&check),
        config.discord.prefix.clone(),
        config.poller.dedupe_on_enable,
    ));
    let poller = Poller::new(Arc::clone(&check), Arc::clone(&store), config.poller.interval());

    Services {
        store,
        check,
        commands,
        poller,
    }
}

/// Run the bot and the poller until ctrl-c or a gateway failure.
///
/// # Errors
/// Returns an error if `DISCORD_TOKEN` is missing outside dry-run mode, if an
/// adapter cannot be built, or if the gateway connection fails.
pub async fn run(config: Config) -> Result<()> {
    let token = DiscordAppConfig::token_from_env();
    if token.is_none() && !config.dry_run {
        return Err(ConfigError::MissingField { field: TOKEN_ENV }.into());
    }

    let store = build_store(&config)?;
    let source = build_source(&config)?;
    let notifier = build_notifier(&config, token.as_deref());
    let services = wire(&config, store, source, notifier);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = tokio::spawn(services.poller.run(shutdown_rx.clone()));

    let serve = serve_commands(&config, token, services.commands, shutdown_rx);
    tokio::pin!(serve);

    let result = tokio::select! {
        result = &mut serve => result,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown requested");
            let _ = shutdown_tx.send(true);
            serve.await
        }
    };

    let _ = shutdown_tx.send(true);
    if let Err(err) = poller.await {
        warn!(error = %err, "Poller task ended abnormally");
    }
    info!("Shutdown complete");
    result
}

/// Serve chat commands until shutdown.
#[cfg(feature = "discord")]
async fn serve_commands(
    config: &Config,
    token: Option<String>,
    commands: Arc<CommandService>,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    match token {
        Some(token) => {
            let handler = DiscordHandler::new(commands, config.discord.prefix.clone());
            run_gateway(&token, handler, shutdown).await
        }
        None => {
            info!("No Discord token, running the poller only");
            wait_for_shutdown(shutdown).await;
            Ok(())
        }
    }
}

/// Serve chat commands until shutdown.
#[cfg(not(feature = "discord"))]
async fn serve_commands(
    _config: &Config,
    _token: Option<String>,
    _commands: Arc<CommandService>,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    info!("Built without Discord support, running the poller only");
    wait_for_shutdown(shutdown).await;
    Ok(())
}

async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    while !*shutdown.borrow() {
        if shutdown.changed().await.is_err() {
            break;
        }
    }
}
