//! Per-guild notification targets.
//!
//! A [`Target`] holds a guild's configuration (master switch, destination
//! channel, store toggles, optional ping role) together with the state used
//! to throttle and de-duplicate posts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::{ChannelId, DealId, GuildId, RoleId};
use super::storefront::Storefront;

/// Per-store on/off switches.
///
/// Every known storefront always has an entry; new guilds start with all
/// stores enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreToggles(BTreeMap<Storefront, bool>);

impl StoreToggles {
    /// Toggles with every store enabled.
    #[must_use]
    pub fn all_enabled() -> Self {
        Self(Storefront::ALL.into_iter().map(|s| (s, true)).collect())
    }

    /// Toggles with every store disabled.
    #[must_use]
    pub fn none_enabled() -> Self {
        Self(Storefront::ALL.into_iter().map(|s| (s, false)).collect())
    }

    /// Whether a store is enabled. Missing entries count as enabled.
    #[must_use]
    pub fn is_enabled(&self, store: Storefront) -> bool {
        self.0.get(&store).copied().unwrap_or(true)
    }

    /// Set a store's switch.
    pub fn set(&mut self, store: Storefront, enabled: bool) {
        self.0.insert(store, enabled);
    }

    /// Flip a store's switch and return the new state.
    pub fn toggle(&mut self, store: Storefront) -> bool {
        let next = !self.is_enabled(store);
        self.set(store, next);
        next
    }

    /// Enabled stores in upstream id order.
    #[must_use]
    pub fn enabled(&self) -> Vec<Storefront> {
        Storefront::ALL
            .into_iter()
            .filter(|store| self.is_enabled(*store))
            .collect()
    }

    /// Whether at least one store is enabled.
    #[must_use]
    pub fn any_enabled(&self) -> bool {
        Storefront::ALL.into_iter().any(|store| self.is_enabled(store))
    }
}

impl Default for StoreToggles {
    fn default() -> Self {
        Self::all_enabled()
    }
}

/// Why a target may or may not receive background notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Enabled, has a destination, and at least one store is on.
    Eligible,
    /// The master switch is off.
    Disabled,
    /// No destination channel configured.
    NoDestination,
    /// Every store toggle is off.
    NoStoresEnabled,
}

/// Notification target for one guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Owning guild; the persistence key.
    pub guild: GuildId,
    /// Master switch for background posting.
    pub enabled: bool,
    /// Where deals are posted.
    pub channel: Option<ChannelId>,
    /// Which storefronts are included in the upstream filter.
    pub stores: StoreToggles,
    /// Unix seconds of the last successful post (0 = never).
    pub last_check: i64,
    /// Id of the last deal posted, the sole de-duplication key.
    pub last_posted_deal: Option<DealId>,
    /// Role mentioned alongside each post.
    pub ping_role: Option<RoleId>,
}

impl Target {
    /// A target with default settings for a guild seen for the first time.
    #[must_use]
    pub fn new(guild: GuildId) -> Self {
        Self {
            guild,
            enabled: true,
            channel: None,
            stores: StoreToggles::default(),
            last_check: 0,
            last_posted_deal: None,
            ping_role: None,
        }
    }

    /// Classify the target against the eligibility invariant.
    #[must_use]
    pub fn eligibility(&self) -> Eligibility {
        if !self.enabled {
            Eligibility::Disabled
        } else if self.channel.is_none() {
            Eligibility::NoDestination
        } else if !self.stores.any_enabled() {
            Eligibility::NoStoresEnabled
        } else {
            Eligibility::Eligible
        }
    }

    /// Whether the target may receive background notifications.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.eligibility() == Eligibility::Eligible
    }

    /// Seconds left before the cooldown elapses, or `None` if it already has.
    #[must_use]
    pub fn cooldown_remaining(&self, now: i64, cooldown_secs: i64) -> Option<i64> {
        let elapsed = now.saturating_sub(self.last_check);
        (elapsed < cooldown_secs).then(|| cooldown_secs - elapsed)
    }

    /// Whether `deal` is the one already posted for this target.
    #[must_use]
    pub fn already_posted(&self, deal: &DealId) -> bool {
        self.last_posted_deal.as_ref() == Some(deal)
    }

    /// Record a successful post.
    pub fn record_post(&mut self, now: i64, deal: DealId) {
        self.last_check = now;
        self.last_posted_deal = Some(deal);
    }
}
