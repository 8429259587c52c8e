//! Storefronts tracked for free-game deals.
//!
//! The upstream aggregator identifies storefronts by small numeric ids. Only
//! five are exposed as per-guild toggles; any other id seen in a deal is
//! displayed as "Unknown Store".

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display name used when a deal references a store outside the known table.
pub const UNKNOWN_STORE: &str = "Unknown Store";

/// A storefront that can be toggled per guild.
///
/// Variants are declared in ascending upstream id order, which is also the
/// order of the comma-separated filter sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Storefront {
    Steam,
    Gog,
    Fanatical,
    EpicGames,
    IndieGala,
}

impl Storefront {
    /// Every known storefront, in upstream id order.
    pub const ALL: [Storefront; 5] = [
        Self::Steam,
        Self::Gog,
        Self::Fanatical,
        Self::EpicGames,
        Self::IndieGala,
    ];

    /// Upstream numeric id.
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::Steam => 1,
            Self::Gog => 7,
            Self::Fanatical => 15,
            Self::EpicGames => 25,
            Self::IndieGala => 30,
        }
    }

    /// Human-readable store name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Steam => "Steam",
            Self::Gog => "GOG",
            Self::Fanatical => "Fanatical",
            Self::EpicGames => "Epic Games",
            Self::IndieGala => "IndieGala",
        }
    }

    /// Chat subcommand that toggles this store.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Steam => "steam",
            Self::Gog => "gog",
            Self::Fanatical => "fanatical",
            Self::EpicGames => "epic",
            Self::IndieGala => "indiegala",
        }
    }

    /// Look up a storefront by upstream id.
    #[must_use]
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|store| store.id() == id)
    }

    /// Look up a storefront by the textual upstream id carried in deal records.
    #[must_use]
    pub fn from_upstream(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().and_then(Self::from_id)
    }

    /// Look up a storefront by its chat subcommand or a loose alias.
    #[must_use]
    pub fn from_command(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "steam" => Some(Self::Steam),
            "gog" => Some(Self::Gog),
            "fanatical" => Some(Self::Fanatical),
            "epic" | "epicgames" | "epic_games" => Some(Self::EpicGames),
            "indiegala" | "indie_gala" => Some(Self::IndieGala),
            _ => None,
        }
    }
}

impl fmt::Display for Storefront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Resolve the display name for an upstream store id.
#[must_use]
pub fn store_display_name(raw_store_id: &str) -> &'static str {
    Storefront::from_upstream(raw_store_id).map_or(UNKNOWN_STORE, Storefront::display_name)
}
