//! Persistence port for per-guild targets.
//!
//! Settings and post-record state are written through separate operations:
//! command handlers only ever call [`TargetStore::save_settings`] and the
//! check routine only ever calls [`TargetStore::record_post`], so neither
//! side can overwrite the other's fields with a stale copy.

use async_trait::async_trait;

use crate::domain::{DealId, GuildId, Target};
use crate::error::Result;

/// Storage operations for notification targets, keyed by guild.
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Load a guild's target, or a default one if none was saved yet.
    async fn load(&self, guild: GuildId) -> Result<Target>;

    /// Upsert the configuration fields of a target (master switch, channel,
    /// store toggles, ping role). `last_check` and `last_posted_deal` of an
    /// existing row are left untouched.
    async fn save_settings(&self, target: &Target) -> Result<()>;

    /// List every saved target.
    async fn list(&self) -> Result<Vec<Target>>;

    /// Record a successful post without touching configuration fields.
    ///
    /// Creates the target with defaults if it does not exist yet.
    async fn record_post(&self, guild: GuildId, checked_at: i64, deal: &DealId) -> Result<()>;
}
