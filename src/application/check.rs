//! The shared fetch / de-duplicate / deliver routine.
//!
//! Both the background poller and the chat commands go through
//! [`DealCheck::evaluate`]; they differ only in the [`CheckPolicy`] they pass
//! and in how they present the resulting [`CheckOutcome`].
//!
//! ```text
//! eligibility ─► cooldown ─► store filter ─► fetch ─► first deal
//!                                                        │
//!             record_post ◄─ deliver ◄─ channel exists ◄─ dedupe
//! ```
//!
//! Everything after the fetch either runs to completion (message delivered
//! and post recorded) or leaves the target untouched.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::notice::{NoticeFormatter, NoticeKind};
use crate::domain::{ChannelId, Deal, Eligibility, Target};
use crate::port::{DealSource, Notifier, TargetStore};

/// Which gates a check honours, and how the resulting notice looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckPolicy {
    /// Skip the enabled / destination / stores invariant.
    pub bypass_eligibility: bool,
    /// Skip the per-target cooldown.
    pub bypass_cooldown: bool,
    /// Post even when the top deal equals the last posted one.
    pub bypass_dedupe: bool,
    /// Notice flavour to render.
    pub kind: NoticeKind,
}

impl CheckPolicy {
    /// Periodic loop: every gate applies.
    #[must_use]
    pub const fn background() -> Self {
        Self {
            bypass_eligibility: false,
            bypass_cooldown: false,
            bypass_dedupe: false,
            kind: NoticeKind::Alert,
        }
    }

    /// Explicit `check` command: ignores eligibility and cooldown, keeps dedupe.
    #[must_use]
    pub const fn manual() -> Self {
        Self {
            bypass_eligibility: true,
            bypass_cooldown: true,
            bypass_dedupe: false,
            kind: NoticeKind::ManualCheck,
        }
    }

    /// Post made when checks are switched on.
    #[must_use]
    pub const fn on_enable(respect_dedupe: bool) -> Self {
        Self {
            bypass_eligibility: true,
            bypass_cooldown: true,
            bypass_dedupe: !respect_dedupe,
            kind: NoticeKind::Enabled,
        }
    }
}

/// Result of one check against one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Master switch is off.
    Disabled,
    /// No configured channel and no fallback.
    NoDestination,
    /// No store toggle is on; nothing was fetched.
    NoStoresEnabled,
    /// The cooldown has not elapsed yet.
    CoolingDown { remaining_secs: i64 },
    /// Upstream request failed (status, transport or decode).
    FetchFailed { reason: String },
    /// Upstream returned no deals.
    NoDeals,
    /// The top deal was already posted for this target.
    Duplicate { deal: Deal },
    /// The destination channel no longer exists.
    ChannelMissing { channel: ChannelId },
    /// The chat backend rejected the message.
    DeliveryFailed { channel: ChannelId, reason: String },
    /// The deal was posted and recorded.
    Posted { deal: Deal, channel: ChannelId },
    /// The deal was posted but the post record could not be saved.
    PostedUnrecorded { deal: Deal, channel: ChannelId },
}

impl CheckOutcome {
    /// Whether a message was delivered.
    #[must_use]
    pub const fn is_posted(&self) -> bool {
        matches!(self, Self::Posted { .. } | Self::PostedUnrecorded { .. })
    }

    /// Whether the outcome reflects a failure rather than a policy skip.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed { .. } | Self::ChannelMissing { .. } | Self::DeliveryFailed { .. }
        )
    }

    /// Short machine-friendly label, used in logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::NoDestination => "no_destination",
            Self::NoStoresEnabled => "no_stores_enabled",
            Self::CoolingDown { .. } => "cooling_down",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::NoDeals => "no_deals",
            Self::Duplicate { .. } => "duplicate",
            Self::ChannelMissing { .. } => "channel_missing",
            Self::DeliveryFailed { .. } => "delivery_failed",
            Self::Posted { .. } => "posted",
            Self::PostedUnrecorded { .. } => "posted_unrecorded",
        }
    }
}

/// Fetches, de-duplicates and delivers deals for one target at a time.
pub struct DealCheck {
    source: Arc<dyn DealSource>,
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn TargetStore>,
    formatter: NoticeFormatter,
    cooldown_secs: i64,
}

impl DealCheck {
    /// Create a check routine over the given ports.
    pub fn new(
        source: Arc<dyn DealSource>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn TargetStore>,
        formatter: NoticeFormatter,
        cooldown_secs: i64,
    ) -> Self {
        Self {
            source,
            notifier,
            store,
            formatter,
            cooldown_secs,
        }
    }

    /// Upstream name, for user-facing replies.
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.source_name()
    }

    /// Notifier used for delivery and channel lookups.
    #[must_use]
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Evaluate `target` at time `now` and post its top deal if warranted.
    ///
    /// `fallback_channel` is used when the target has no configured channel
    /// (the invoking channel for command-triggered checks).
    pub async fn evaluate(
        &self,
        target: &Target,
        now: i64,
        policy: CheckPolicy,
        fallback_channel: Option<ChannelId>,
    ) -> CheckOutcome {
        let guild = target.guild;

        if !policy.bypass_eligibility {
            match target.eligibility() {
                Eligibility::Eligible => {}
                Eligibility::Disabled => return CheckOutcome::Disabled,
                Eligibility::NoDestination => return CheckOutcome::NoDestination,
                Eligibility::NoStoresEnabled => return CheckOutcome::NoStoresEnabled,
            }
        }

        if !policy.bypass_cooldown {
            if let Some(remaining_secs) = target.cooldown_remaining(now, self.cooldown_secs) {
                debug!(guild = %guild, remaining_secs, "Target cooling down");
                return CheckOutcome::CoolingDown { remaining_secs };
            }
        }

        let stores = target.stores.enabled();
        if stores.is_empty() {
            return CheckOutcome::NoStoresEnabled;
        }

        let Some(channel) = target.channel.or(fallback_channel) else {
            return CheckOutcome::NoDestination;
        };

        let deals = match self.source.free_deals(&stores).await {
            Ok(deals) => deals,
            Err(err) => {
                warn!(guild = %guild, error = %err, "Deal fetch failed");
                return CheckOutcome::FetchFailed {
                    reason: err.to_string(),
                };
            }
        };

        let Some(deal) = deals.into_iter().next() else {
            debug!(guild = %guild, "No free deals available");
            return CheckOutcome::NoDeals;
        };

        if !policy.bypass_dedupe && target.already_posted(&deal.id) {
            debug!(guild = %guild, deal_id = %deal.id, "Top deal already posted");
            return CheckOutcome::Duplicate { deal };
        }

        if !self.notifier.channel_exists(guild, channel).await {
            debug!(guild = %guild, channel = %channel, "Destination channel not found");
            return CheckOutcome::ChannelMissing { channel };
        }

        let notice = self.formatter.render(policy.kind, &deal);
        if let Err(err) = self.notifier.deliver(channel, &notice, target.ping_role).await {
            warn!(guild = %guild, channel = %channel, error = %err, "Deal delivery failed");
            return CheckOutcome::DeliveryFailed {
                channel,
                reason: err.to_string(),
            };
        }

        if let Err(err) = self.store.record_post(guild, now, &deal.id).await {
            error!(guild = %guild, deal_id = %deal.id, error = %err, "Failed to record post");
            return CheckOutcome::PostedUnrecorded { deal, channel };
        }

        info!(
            guild = %guild,
            channel = %channel,
            deal_id = %deal.id,
            title = %deal.title,
            store = deal.store_name(),
            "Posted free game"
        );

        CheckOutcome::Posted { deal, channel }
    }
}
