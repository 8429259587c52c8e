//! Notifier port for deal announcements.
//!
//! This module defines the rendered message handed to a chat backend and the
//! trait backends implement to resolve channels and deliver messages.

use async_trait::async_trait;
use tracing::info;

use crate::domain::{ChannelId, Deal, GuildId, RoleId};
use crate::error::Result;

/// One inline or block field of a rich message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeField {
    /// Field heading.
    pub name: String,
    /// Field body (may contain markdown links).
    pub value: String,
    /// Render side by side with neighbouring inline fields.
    pub inline: bool,
}

/// A fully rendered deal announcement.
///
/// Produced by the application layer and turned into a platform message by
/// a [`Notifier`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealNotice {
    /// The deal being announced.
    pub deal: Deal,
    /// Message headline.
    pub title: String,
    /// Message body.
    pub description: String,
    /// Public link to the deal.
    pub url: String,
    /// Extra fields (store name, view link, ...).
    pub fields: Vec<NoticeField>,
    /// Thumbnail image, when upstream provided one.
    pub thumbnail: Option<String>,
    /// Small print under the message.
    pub footer: String,
}

impl DealNotice {
    /// Every piece of visible text, joined; used for logging and assertions.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut text = format!("{}\n{}", self.title, self.description);
        for field in &self.fields {
            text.push('\n');
            text.push_str(&field.name);
            text.push_str(": ");
            text.push_str(&field.value);
        }
        text.push('\n');
        text.push_str(&self.footer);
        text
    }
}

/// Chat backend capable of posting deal notices.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `channel_exists` must only accept channels that belong to `guild`
/// - `deliver` must only allow the given role to be mentioned; with no role,
///   the message must not ping anyone
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Whether `channel` is a reachable text channel of `guild`.
    async fn channel_exists(&self, guild: GuildId, channel: ChannelId) -> bool;

    /// Post a notice to a channel, optionally mentioning a role.
    async fn deliver(
        &self,
        channel: ChannelId,
        notice: &DealNotice,
        mention: Option<RoleId>,
    ) -> Result<()>;
}

/// A logging notifier that records deliveries via tracing instead of posting.
///
/// Every channel is treated as existing.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn channel_exists(&self, _guild: GuildId, _channel: ChannelId) -> bool {
        true
    }

    async fn deliver(
        &self,
        channel: ChannelId,
        notice: &DealNotice,
        mention: Option<RoleId>,
    ) -> Result<()> {
        info!(
            channel = %channel,
            deal_id = %notice.deal.id,
            title = %notice.deal.title,
            store = notice.deal.store_name(),
            mention = ?mention.map(RoleId::get),
            "Deal notice (dry run)"
        );
        Ok(())
    }
}
