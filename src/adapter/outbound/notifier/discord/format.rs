//! Message building for Discord posts and replies.

use serenity::builder::{CreateAllowedMentions, CreateEmbed, CreateEmbedFooter, CreateMessage};
use serenity::model::id::RoleId as DiscordRoleId;
use serenity::model::Colour;

use crate::domain::RoleId;
use crate::port::DealNotice;

/// Embed accent colour.
const DEAL_COLOUR: Colour = Colour::new(0x2E_CC_71);

/// Build the embed message for a deal notice.
///
/// With a ping role the message content mentions it and only that role may
/// be pinged; without one no mention is allowed at all.
pub fn deal_message(notice: &DealNotice, mention: Option<RoleId>) -> CreateMessage {
    let mut embed = CreateEmbed::new()
        .title(&notice.title)
        .url(&notice.url)
        .description(&notice.description)
        .colour(DEAL_COLOUR)
        .footer(CreateEmbedFooter::new(&notice.footer));
    for field in &notice.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }
    if let Some(thumbnail) = &notice.thumbnail {
        embed = embed.thumbnail(thumbnail);
    }

    let message = CreateMessage::new().embed(embed);
    match mention {
        Some(role) => message.content(role.mention()).allowed_mentions(
            CreateAllowedMentions::new().roles(vec![DiscordRoleId::new(role.get())]),
        ),
        None => message.allowed_mentions(CreateAllowedMentions::new()),
    }
}

/// Build a plain-text command reply that never pings anyone.
pub fn reply_message(text: &str) -> CreateMessage {
    CreateMessage::new()
        .content(text)
        .allowed_mentions(CreateAllowedMentions::new())
}
