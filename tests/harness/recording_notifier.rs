use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use freegames::domain::{ChannelId, GuildId, RoleId};
use freegames::error::{Error, Result};
use freegames::port::{DealNotice, Notifier};

/// One delivered notice.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub channel: ChannelId,
    pub notice: DealNotice,
    pub mention: Option<RoleId>,
}

/// Thread-safe notice collector for delivery assertions in tests.
///
/// Channels marked missing fail the existence check; channels marked broken
/// exist but reject deliveries. A channel handed to `assign` only exists for
/// its owning guild; unassigned channels exist for every guild.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    deliveries: Arc<Mutex<Vec<Delivery>>>,
    missing: Arc<Mutex<HashSet<ChannelId>>>,
    broken: Arc<Mutex<HashSet<ChannelId>>>,
    owners: Arc<Mutex<HashMap<ChannelId, GuildId>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_missing(&self, channel: ChannelId) {
        self.missing.lock().expect("lock missing").insert(channel);
    }

    pub fn mark_broken(&self, channel: ChannelId) {
        self.broken.lock().expect("lock broken").insert(channel);
    }

    pub fn assign(&self, channel: ChannelId, guild: GuildId) {
        self.owners.lock().expect("lock owners").insert(channel, guild);
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().expect("lock deliveries").clone()
    }

    pub fn len(&self) -> usize {
        self.deliveries.lock().expect("lock deliveries").len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn channel_exists(&self, guild: GuildId, channel: ChannelId) -> bool {
        if self.missing.lock().expect("lock missing").contains(&channel) {
            return false;
        }
        self.owners
            .lock()
            .expect("lock owners")
            .get(&channel)
            .map_or(true, |owner| *owner == guild)
    }

    async fn deliver(
        &self,
        channel: ChannelId,
        notice: &DealNotice,
        mention: Option<RoleId>,
    ) -> Result<()> {
        if self.broken.lock().expect("lock broken").contains(&channel) {
            return Err(Error::Delivery(format!("channel {channel} rejected the message")));
        }
        self.deliveries
            .lock()
            .expect("lock deliveries")
            .push(Delivery {
                channel,
                notice: notice.clone(),
                mention,
            });
        Ok(())
    }
}
