//! In-memory target store.
//!
//! Backs unit tests and runs configured with `database = ":memory:"`,
//! typically dry runs that should not touch a database file.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{DealId, GuildId, Target};
use crate::error::Result;
use crate::port::TargetStore;

/// Thread-safe, process-local [`TargetStore`].
#[derive(Debug, Default)]
pub struct MemoryTargetStore {
    targets: RwLock<HashMap<GuildId, Target>>,
}

impl MemoryTargetStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.read().len()
    }

    /// Whether no target has been saved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.read().is_empty()
    }
}

#[async_trait]
impl TargetStore for MemoryTargetStore {
    async fn load(&self, guild: GuildId) -> Result<Target> {
        Ok(self
            .targets
            .read()
            .get(&guild)
            .cloned()
            .unwrap_or_else(|| Target::new(guild)))
    }

    async fn save_settings(&self, target: &Target) -> Result<()> {
        let mut targets = self.targets.write();
        let entry = targets
            .entry(target.guild)
            .or_insert_with(|| target.clone());
        entry.enabled = target.enabled;
        entry.channel = target.channel;
        entry.stores = target.stores.clone();
        entry.ping_role = target.ping_role;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Target>> {
        let mut targets: Vec<Target> = self.targets.read().values().cloned().collect();
        targets.sort_by_key(|target| target.guild);
        Ok(targets)
    }

    async fn record_post(&self, guild: GuildId, checked_at: i64, deal: &DealId) -> Result<()> {
        self.targets
            .write()
            .entry(guild)
            .or_insert_with(|| Target::new(guild))
            .record_post(checked_at, deal.clone());
        Ok(())
    }
}
