//! Periodic background poller.
//!
//! Wakes on a fixed interval and runs [`DealCheck::evaluate`] with the
//! background policy for every saved target. How often a guild actually gets
//! a post is governed by the per-target cooldown, not by the wake interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::check::{CheckOutcome, CheckPolicy, DealCheck};
use crate::port::TargetStore;

/// Tally of one polling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    /// Targets visited.
    pub targets: usize,
    /// Targets that received a post.
    pub posted: usize,
    /// Targets skipped by policy (ineligible, cooling down, duplicate, no deals).
    pub skipped: usize,
    /// Targets whose fetch or delivery failed.
    pub failed: usize,
}

impl PollSummary {
    fn record(&mut self, outcome: &CheckOutcome) {
        self.targets += 1;
        if outcome.is_posted() {
            self.posted += 1;
        } else if outcome.is_failure() {
            self.failed += 1;
        } else {
            self.skipped += 1;
        }
    }
}

/// Background task that polls on a fixed interval.
pub struct Poller {
    check: Arc<DealCheck>,
    store: Arc<dyn TargetStore>,
    interval: Duration,
}

impl Poller {
    /// Create a poller waking every `interval`.
    pub fn new(check: Arc<DealCheck>, store: Arc<dyn TargetStore>, interval: Duration) -> Self {
        Self {
            check,
            store,
            interval,
        }
    }

    /// Run one pass over every saved target at time `now`.
    ///
    /// Targets are handled independently; one target's failure never stops
    /// the pass.
    pub async fn run_once(&self, now: i64) -> PollSummary {
        let mut summary = PollSummary::default();

        let targets = match self.store.list().await {
            Ok(targets) => targets,
            Err(err) => {
                warn!(error = %err, "Failed to list targets, skipping poll");
                return summary;
            }
        };

        for target in &targets {
            let outcome = self
                .check
                .evaluate(target, now, CheckPolicy::background(), None)
                .await;
            debug!(guild = %target.guild, outcome = outcome.label(), "Target polled");
            summary.record(&outcome);
        }

        summary
    }

    /// Poll until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// The first pass runs immediately.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!(interval_secs = self.interval.as_secs(), "Poller started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Poller shutting down");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let now = chrono::Utc::now().timestamp();
                    let summary = self.run_once(now).await;
                    info!(
                        targets = summary.targets,
                        posted = summary.posted,
                        skipped = summary.skipped,
                        failed = summary.failed,
                        "Poll complete"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;
    use crate::adapter::outbound::memory::MemoryTargetStore;
    use crate::application::notice::{NoticeFormatter, DEFAULT_REDIRECT_PREFIX};
    use crate::domain::{ChannelId, Deal, DealId, GuildId, RoleId, Storefront, Target};
    use crate::error::Result;
    use crate::port::{DealNotice, DealSource, Notifier};

    const NOW: i64 = 1_700_000_000;

    struct FixedSource(Vec<Deal>);

    #[async_trait]
    impl DealSource for FixedSource {
        async fn free_deals(&self, _stores: &[Storefront]) -> Result<Vec<Deal>> {
            Ok(self.0.clone())
        }

        fn source_name(&self) -> &'static str {
            "fixed"
        }
    }

    #[derive(Default)]
    struct Sink {
        sent: Mutex<Vec<ChannelId>>,
    }

    #[async_trait]
    impl Notifier for Sink {
        // Channel 404 is gone; every other channel belongs to the guild whose
        // id is its first digit.
        async fn channel_exists(&self, guild: GuildId, channel: ChannelId) -> bool {
            channel.get() != 404 && channel.to_string().starts_with(&guild.to_string())
        }

        async fn deliver(
            &self,
            channel: ChannelId,
            _notice: &DealNotice,
            _mention: Option<RoleId>,
        ) -> Result<()> {
            self.sent.lock().push(channel);
            Ok(())
        }
    }

    async fn poller_with(targets: Vec<Target>) -> (Poller, Arc<Sink>, Arc<MemoryTargetStore>) {
        let store = Arc::new(MemoryTargetStore::new());
        for target in &targets {
            store.save_settings(target).await.unwrap();
        }
        let sink = Arc::new(Sink::default());
        let check = Arc::new(DealCheck::new(
            Arc::new(FixedSource(vec![Deal::new("42", "Foo", "1", "u")])),
            sink.clone(),
            store.clone(),
            NoticeFormatter::new(DEFAULT_REDIRECT_PREFIX, "!", 10_800),
            10_800,
        ));
        let poller = Poller::new(check, store.clone(), Duration::from_secs(600));
        (poller, sink, store)
    }

    fn routed(guild: u64, channel: u64) -> Target {
        let mut target = Target::new(GuildId::new(guild));
        target.channel = Some(ChannelId::new(channel));
        target
    }

    #[tokio::test]
    async fn second_pass_within_cooldown_posts_nothing() {
        let (poller, sink, _store) = poller_with(vec![routed(1, 10)]).await;

        let first = poller.run_once(NOW).await;
        let second = poller.run_once(NOW + 600).await;

        assert_eq!(first.posted, 1);
        assert_eq!(second.posted, 0);
        assert_eq!(second.skipped, 1);
        assert_eq!(sink.sent.lock().len(), 1);
    }

    #[tokio::test]
    async fn same_deal_after_cooldown_is_deduplicated() {
        let (poller, sink, store) = poller_with(vec![routed(1, 10)]).await;

        poller.run_once(NOW).await;
        let later = poller.run_once(NOW + 10_800).await;

        assert_eq!(later.posted, 0);
        assert_eq!(sink.sent.lock().len(), 1);
        let target = store.load(GuildId::new(1)).await.unwrap();
        assert_eq!(target.last_check, NOW);
        assert_eq!(target.last_posted_deal, Some(DealId::from("42")));
    }

    #[tokio::test]
    async fn failing_target_does_not_block_others() {
        let mut disabled = routed(3, 30);
        disabled.enabled = false;
        let (poller, sink, _store) =
            poller_with(vec![routed(1, 404), routed(2, 20), disabled]).await;

        let summary = poller.run_once(NOW).await;

        assert_eq!(
            summary,
            PollSummary {
                targets: 3,
                posted: 1,
                skipped: 1,
                failed: 1,
            }
        );
        assert_eq!(*sink.sent.lock(), vec![ChannelId::new(20)]);
    }

    #[tokio::test]
    async fn channel_owned_by_another_guild_is_never_posted_to() {
        let (poller, sink, store) = poller_with(vec![routed(1, 10), routed(2, 10)]).await;

        let summary = poller.run_once(NOW).await;

        assert_eq!(summary.posted, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(sink.sent.lock().len(), 1);
        let hijacked = store.load(GuildId::new(2)).await.unwrap();
        assert_eq!(hijacked.last_posted_deal, None);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let (poller, _sink, _store) = poller_with(vec![]).await;
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(poller.run(rx));
        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("poller should stop")
            .unwrap();
    }
}
