//! Discord command parsing.
//!
//! Messages look like `!freegames <subcommand> [argument]`. Channel and role
//! arguments accept either a mention (`<#id>`, `<@&id>`) or a raw id.

use crate::application::{FreeGamesCommand, RoleArg, ROOT_COMMAND};
use crate::domain::{ChannelId, RoleId, Storefront};

/// Parse error for Discord command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
    InvalidChannel(String),
    InvalidRole(String),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown subcommand `{cmd}`"),
            Self::InvalidChannel(value) => {
                write!(f, "`{value}` is not a channel (mention one like #deals)")
            }
            Self::InvalidRole(value) => {
                write!(f, "`{value}` is not a role (mention one like @gamers, or use `none`)")
            }
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a Discord message into a command.
///
/// Returns [`CommandParseError::NotACommand`] for anything that is not
/// addressed to the root command, so ordinary chat is ignored silently.
pub fn parse_command(text: &str, prefix: &str) -> Result<FreeGamesCommand, CommandParseError> {
    let Some(rest) = text.trim_start().strip_prefix(prefix) else {
        return Err(CommandParseError::NotACommand);
    };

    let mut parts = rest.split_whitespace();
    match parts.next() {
        Some(root) if root.eq_ignore_ascii_case(ROOT_COMMAND) => {}
        _ => return Err(CommandParseError::NotACommand),
    }

    let Some(sub) = parts.next() else {
        return Ok(FreeGamesCommand::Help);
    };
    let sub = sub.to_ascii_lowercase();
    let argument = parts.next();

    match sub.as_str() {
        "help" => Ok(FreeGamesCommand::Help),
        "toggle" => Ok(FreeGamesCommand::Toggle),
        "check" => Ok(FreeGamesCommand::Check),
        "channel" => match argument {
            None => Ok(FreeGamesCommand::Channel(None)),
            Some(raw) => parse_channel(raw)
                .map(|channel| FreeGamesCommand::Channel(Some(channel)))
                .ok_or_else(|| CommandParseError::InvalidChannel(raw.to_string())),
        },
        "ping_role" | "pingrole" => match argument {
            None => Ok(FreeGamesCommand::PingRole(RoleArg::Show)),
            Some(raw) if matches!(raw.to_ascii_lowercase().as_str(), "none" | "clear" | "off") => {
                Ok(FreeGamesCommand::PingRole(RoleArg::Clear))
            }
            Some(raw) => parse_role(raw)
                .map(|role| FreeGamesCommand::PingRole(RoleArg::Set(role)))
                .ok_or_else(|| CommandParseError::InvalidRole(raw.to_string())),
        },
        other => Storefront::from_command(other)
            .map(FreeGamesCommand::Store)
            .ok_or_else(|| CommandParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_channel(raw: &str) -> Option<ChannelId> {
    let id = raw
        .strip_prefix("<#")
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(raw);
    id.parse().ok()
}

fn parse_role(raw: &str) -> Option<RoleId> {
    let id = raw
        .strip_prefix("<@&")
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(raw);
    id.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<FreeGamesCommand, CommandParseError> {
        parse_command(text, "!")
    }

    // -------------------------------------------------------------------------
    // Root command handling
    // -------------------------------------------------------------------------

    #[test]
    fn ordinary_chat_is_not_a_command() {
        assert_eq!(parse("hello"), Err(CommandParseError::NotACommand));
        assert_eq!(parse("!other toggle"), Err(CommandParseError::NotACommand));
        assert_eq!(parse("!"), Err(CommandParseError::NotACommand));
        assert_eq!(parse("freegames toggle"), Err(CommandParseError::NotACommand));
    }

    #[test]
    fn bare_root_shows_help() {
        assert_eq!(parse("!freegames"), Ok(FreeGamesCommand::Help));
        assert_eq!(parse("!freegames help"), Ok(FreeGamesCommand::Help));
    }

    #[test]
    fn root_and_subcommand_are_case_insensitive() {
        assert_eq!(parse("!FreeGames TOGGLE"), Ok(FreeGamesCommand::Toggle));
    }

    #[test]
    fn custom_prefix() {
        assert_eq!(parse_command("?freegames check", "?"), Ok(FreeGamesCommand::Check));
        assert_eq!(
            parse_command("!freegames check", "?"),
            Err(CommandParseError::NotACommand)
        );
    }

    // -------------------------------------------------------------------------
    // Subcommands
    // -------------------------------------------------------------------------

    #[test]
    fn store_subcommands() {
        assert_eq!(
            parse("!freegames steam"),
            Ok(FreeGamesCommand::Store(Storefront::Steam))
        );
        assert_eq!(
            parse("!freegames epic"),
            Ok(FreeGamesCommand::Store(Storefront::EpicGames))
        );
        assert_eq!(
            parse("!freegames gog"),
            Ok(FreeGamesCommand::Store(Storefront::Gog))
        );
        assert_eq!(
            parse("!freegames indiegala"),
            Ok(FreeGamesCommand::Store(Storefront::IndieGala))
        );
        assert_eq!(
            parse("!freegames fanatical"),
            Ok(FreeGamesCommand::Store(Storefront::Fanatical))
        );
    }

    #[test]
    fn channel_accepts_mention_or_id() {
        assert_eq!(parse("!freegames channel"), Ok(FreeGamesCommand::Channel(None)));
        assert_eq!(
            parse("!freegames channel <#123>"),
            Ok(FreeGamesCommand::Channel(Some(ChannelId::new(123))))
        );
        assert_eq!(
            parse("!freegames channel 456"),
            Ok(FreeGamesCommand::Channel(Some(ChannelId::new(456))))
        );
        assert_eq!(
            parse("!freegames channel #general"),
            Err(CommandParseError::InvalidChannel("#general".into()))
        );
    }

    #[test]
    fn ping_role_show_set_clear() {
        assert_eq!(
            parse("!freegames ping_role"),
            Ok(FreeGamesCommand::PingRole(RoleArg::Show))
        );
        assert_eq!(
            parse("!freegames ping_role <@&99>"),
            Ok(FreeGamesCommand::PingRole(RoleArg::Set(RoleId::new(99))))
        );
        assert_eq!(
            parse("!freegames ping_role 99"),
            Ok(FreeGamesCommand::PingRole(RoleArg::Set(RoleId::new(99))))
        );
        assert_eq!(
            parse("!freegames ping_role None"),
            Ok(FreeGamesCommand::PingRole(RoleArg::Clear))
        );
        assert_eq!(
            parse("!freegames ping_role <@99>"),
            Err(CommandParseError::InvalidRole("<@99>".into()))
        );
    }

    #[test]
    fn unknown_subcommand_is_reported() {
        let err = parse("!freegames humble").unwrap_err();
        assert_eq!(err, CommandParseError::UnknownCommand("humble".into()));
        assert_eq!(err.to_string(), "unknown subcommand `humble`");
    }
}
