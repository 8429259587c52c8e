//! Authorization for Discord command handling.

use serenity::model::Permissions;
use tracing::debug;

use crate::domain::GuildId;

/// Whether a member may run privileged commands.
///
/// Unknown permissions (member or guild not cached) count as unprivileged.
pub fn is_privileged(permissions: Option<Permissions>) -> bool {
    permissions.is_some_and(|p| p.administrator() || p.manage_guild())
}

/// Guild a message should be handled for, or `None` to ignore it.
///
/// Bots (including ourselves) and direct messages never reach the command
/// service.
pub fn command_guild(author_is_bot: bool, guild: Option<u64>) -> Option<GuildId> {
    if author_is_bot {
        return None;
    }

    match guild {
        Some(id) => Some(GuildId::new(id)),
        None => {
            debug!("Ignoring command outside a guild");
            None
        }
    }
}
