//! Discord gateway event handling.
//!
//! Listens for guild messages, parses `!freegames ...` commands and hands
//! them to the [`CommandService`]. Replies go back to the invoking channel.

use std::sync::Arc;

use serenity::async_trait;
use serenity::client::{Client, Context, EventHandler};
use serenity::model::channel::Message;
use serenity::model::gateway::{GatewayIntents, Ready};
use tokio::sync::watch;
use tracing::{error, info, warn};

use super::auth::{command_guild, is_privileged};
use super::command::{parse_command, CommandParseError};
use super::format::reply_message;
use crate::application::{CommandService, Invocation};
use crate::domain::ChannelId;
use crate::error::Result;

/// Gateway event handler for chat commands.
pub struct DiscordHandler {
    commands: Arc<CommandService>,
    prefix: String,
}

impl DiscordHandler {
    /// Create a handler answering to `prefix` + root command.
    pub fn new(commands: Arc<CommandService>, prefix: impl Into<String>) -> Self {
        Self {
            commands,
            prefix: prefix.into(),
        }
    }

    /// Replies for a message, or `None` when it should be ignored.
    async fn replies_for(&self, ctx: &Context, msg: &Message) -> Option<Vec<String>> {
        let guild = command_guild(msg.author.bot, msg.guild_id.map(|id| id.get()))?;

        let command = match parse_command(&msg.content, &self.prefix) {
            Ok(command) => command,
            Err(CommandParseError::NotACommand) => return None,
            Err(err) => {
                return Some(vec![format!(
                    "Invalid command: {err}\n\n{}",
                    self.commands.help_text()
                )])
            }
        };

        let invocation = Invocation {
            guild,
            channel: ChannelId::new(msg.channel_id.get()),
            privileged: command.requires_privilege()
                && is_privileged(msg.author_permissions(&ctx.cache)),
        };

        let now = chrono::Utc::now().timestamp();
        match self.commands.execute(&invocation, command, now).await {
            Ok(replies) => Some(replies),
            Err(err) => {
                error!(guild = %guild, error = %err, "Command failed");
                Some(vec![
                    "⚠ Something went wrong while saving your settings. Please try again."
                        .to_string(),
                ])
            }
        }
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn message(&self, ctx: Context, msg: Message) {
        let Some(replies) = self.replies_for(&ctx, &msg).await else {
            return;
        };

        for reply in replies {
            if let Err(e) = msg
                .channel_id
                .send_message(&ctx.http, reply_message(&reply))
                .await
            {
                error!(error = %e, "Failed to send Discord command response");
            }
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "Discord gateway connected"
        );
    }
}

/// Connect to the gateway and serve commands until `shutdown` fires.
///
/// # Errors
/// Returns an error if the client cannot be built or the gateway connection
/// fails.
pub async fn run_gateway(
    token: &str,
    handler: DiscordHandler,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(token, intents)
        .event_handler(handler)
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        while shutdown.changed().await.is_ok() {
            if *shutdown.borrow() {
                break;
            }
        }
        warn!("Shutting down Discord gateway");
        shard_manager.shutdown_all().await;
    });

    client.start().await?;
    Ok(())
}
