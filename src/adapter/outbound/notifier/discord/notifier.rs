//! Discord deal delivery.
//!
//! Provides the [`DiscordNotifier`], which posts rendered deal notices as
//! embeds over the Discord REST API.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::channel::{Channel, ChannelType};
use serenity::model::id::ChannelId as DiscordChannelId;
use tracing::{debug, info};

use super::format::deal_message;
use crate::domain::{ChannelId, GuildId, RoleId};
use crate::error::Result;
use crate::port::{DealNotice, Notifier};

/// Notifier that posts to Discord channels.
pub struct DiscordNotifier {
    http: Arc<Http>,
}

impl DiscordNotifier {
    /// Create a notifier sharing an existing REST client.
    #[must_use]
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Create a notifier with its own REST client for `token`.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        Self::new(Arc::new(Http::new(token)))
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn channel_exists(&self, guild: GuildId, channel: ChannelId) -> bool {
        match self
            .http
            .get_channel(DiscordChannelId::new(channel.get()))
            .await
        {
            Ok(found) => postable_in(&found, guild),
            Err(err) => {
                debug!(channel = %channel, error = %err, "Channel lookup failed");
                false
            }
        }
    }

    async fn deliver(
        &self,
        channel: ChannelId,
        notice: &DealNotice,
        mention: Option<RoleId>,
    ) -> Result<()> {
        DiscordChannelId::new(channel.get())
            .send_message(&self.http, deal_message(notice, mention))
            .await?;
        info!(channel = %channel, deal_id = %notice.deal.id, "Deal notice sent to Discord");
        Ok(())
    }
}

/// A channel accepts deal posts for `guild` only when it is one of that
/// guild's text or announcement channels.
fn postable_in(channel: &Channel, guild: GuildId) -> bool {
    match channel {
        Channel::Guild(found) => {
            found.guild_id.get() == guild.get()
                && matches!(found.kind, ChannelType::Text | ChannelType::News)
        }
        _ => false,
    }
}
