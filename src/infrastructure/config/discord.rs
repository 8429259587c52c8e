//! Discord bot configuration.

use serde::Deserialize;

/// Environment variable holding the bot token. The token is never read from
/// the config file.
pub const TOKEN_ENV: &str = "DISCORD_TOKEN";

fn default_prefix() -> String {
    "!".into()
}

/// Discord bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordAppConfig {
    /// Command prefix placed before the root command (`!freegames`).
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl DiscordAppConfig {
    /// Read the bot token from [`TOKEN_ENV`].
    ///
    /// Returns `None` if the variable is unset or blank.
    #[must_use]
    pub fn token_from_env() -> Option<String> {
        std::env::var(TOKEN_ENV)
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}

impl Default for DiscordAppConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}
