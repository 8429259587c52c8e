//! Discord notification and command handling.
//!
//! Provides the [`DiscordNotifier`] for posting deal notices and the gateway
//! event handler that turns `!freegames ...` messages into commands.
//!
//! Requires the `discord` feature to be enabled.

mod auth;
mod command;
mod format;

pub mod handler;
pub mod notifier;

pub use command::{parse_command, CommandParseError};
pub use handler::{run_gateway, DiscordHandler};
pub use notifier::DiscordNotifier;
