//! Domain identifier types with proper encapsulation.
//!
//! Chat-platform snowflakes are kept as plain `u64` newtypes so the core
//! never depends on a Discord client library.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw snowflake.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw snowflake value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

snowflake_id!(
    /// Guild (community) identifier. One notification target exists per guild.
    GuildId
);

snowflake_id!(
    /// Text channel identifier.
    ChannelId
);

snowflake_id!(
    /// Role identifier used for optional mentions.
    RoleId
);

impl ChannelId {
    /// Chat markup that renders as a clickable channel reference.
    #[must_use]
    pub fn mention(self) -> String {
        format!("<#{}>", self.0)
    }
}

impl RoleId {
    /// Chat markup that pings every member holding the role.
    #[must_use]
    pub fn mention(self) -> String {
        format!("<@&{}>", self.0)
    }
}

/// Upstream deal identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DealId(String);

impl DealId {
    /// Create a new `DealId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the deal ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DealId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for DealId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflakes_parse_and_display() {
        let guild: GuildId = "81384788765712384".parse().unwrap();
        assert_eq!(guild.get(), 81_384_788_765_712_384);
        assert_eq!(guild.to_string(), "81384788765712384");
        assert!("not-a-number".parse::<GuildId>().is_err());
    }

    #[test]
    fn mentions_use_chat_markup() {
        assert_eq!(ChannelId::new(42).mention(), "<#42>");
        assert_eq!(RoleId::new(7).mention(), "<@&7>");
    }

    #[test]
    fn deal_id_equality_is_by_value() {
        assert_eq!(DealId::from("D1"), DealId::new(String::from("D1")));
        assert_ne!(DealId::from("D1"), DealId::from("D2"));
        assert_eq!(DealId::from("abc").as_str(), "abc");
    }
}
