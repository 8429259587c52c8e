//! Chat command handling.
//!
//! Commands mutate the stored [`Target`] through
//! [`TargetStore::save_settings`] and may run the shared [`DealCheck`]
//! immediately. Replies are plain chat text; the adapter decides how to send
//! them.

use std::sync::Arc;

use tracing::info;

use super::check::{CheckOutcome, CheckPolicy, DealCheck};
use crate::domain::{ChannelId, GuildId, RoleId, Storefront, Target};
use crate::error::Result;
use crate::port::TargetStore;

/// Root word every chat command hangs off (`!freegames toggle`).
pub const ROOT_COMMAND: &str = "freegames";

/// Argument of the `ping_role` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArg {
    /// Report the current role.
    Show,
    /// Mention this role with every post.
    Set(RoleId),
    /// Stop mentioning anyone.
    Clear,
}

/// A parsed subcommand of the root command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeGamesCommand {
    /// Usage overview.
    Help,
    /// Flip the master switch.
    Toggle,
    /// Show or set the destination channel.
    Channel(Option<ChannelId>),
    /// Flip one storefront.
    Store(Storefront),
    /// Show, set or clear the ping role.
    PingRole(RoleArg),
    /// Post the current top deal right away.
    Check,
}

impl FreeGamesCommand {
    /// Whether only privileged members may run the command.
    #[must_use]
    pub const fn requires_privilege(&self) -> bool {
        matches!(self, Self::PingRole(_) | Self::Check)
    }
}

/// Who invoked a command, and from where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub guild: GuildId,
    /// Channel the command was typed in.
    pub channel: ChannelId,
    /// Administrator or Manage Server in the guild.
    pub privileged: bool,
}

/// Executes chat commands against the target store.
pub struct CommandService {
    store: Arc<dyn TargetStore>,
    check: Arc<DealCheck>,
    prefix: String,
    dedupe_on_enable: bool,
}

impl CommandService {
    /// Create a command service.
    ///
    /// `dedupe_on_enable` decides whether the post made when checks are
    /// switched on skips a deal that was already posted.
    pub fn new(
        store: Arc<dyn TargetStore>,
        check: Arc<DealCheck>,
        prefix: impl Into<String>,
        dedupe_on_enable: bool,
    ) -> Self {
        Self {
            store,
            check,
            prefix: prefix.into(),
            dedupe_on_enable,
        }
    }

    /// Full root command including the prefix, e.g. `!freegames`.
    #[must_use]
    pub fn root(&self) -> String {
        format!("{}{ROOT_COMMAND}", self.prefix)
    }

    /// Usage overview listing every subcommand.
    #[must_use]
    pub fn help_text(&self) -> String {
        let root = self.root();
        format!(
            "🎮 **Free game commands**\n\
            `{root} toggle` - turn free game checks on or off\n\
            `{root} channel [#channel]` - show or set where deals are posted\n\
            `{root} steam|epic|gog|indiegala|fanatical` - include or exclude a store\n\
            `{root} ping_role [@role|none]` - show, set or clear the role to ping (admin)\n\
            `{root} check` - post the current free game now (admin)"
        )
    }

    /// Run `command` for `invocation` at unix time `now` and return the
    /// reply lines, in order.
    ///
    /// Store failures propagate; check outcomes are always turned into text.
    pub async fn execute(
        &self,
        invocation: &Invocation,
        command: FreeGamesCommand,
        now: i64,
    ) -> Result<Vec<String>> {
        if command.requires_privilege() && !invocation.privileged {
            return Ok(vec![
                "⛔ You need the Administrator or Manage Server permission to do that.".to_string(),
            ]);
        }

        match command {
            FreeGamesCommand::Help => Ok(vec![self.help_text()]),
            FreeGamesCommand::Toggle => self.toggle(invocation, now).await,
            FreeGamesCommand::Channel(None) => self.show_channel(invocation.guild).await,
            FreeGamesCommand::Channel(Some(channel)) => {
                self.set_channel(invocation.guild, channel).await
            }
            FreeGamesCommand::Store(store) => self.toggle_store(invocation.guild, store).await,
            FreeGamesCommand::PingRole(arg) => self.ping_role(invocation.guild, arg).await,
            FreeGamesCommand::Check => {
                let target = self.store.load(invocation.guild).await?;
                let outcome = self
                    .check
                    .evaluate(&target, now, CheckPolicy::manual(), Some(invocation.channel))
                    .await;
                info!(guild = %invocation.guild, outcome = outcome.label(), "Manual check");
                Ok(self.describe_outcome(&outcome, invocation.channel))
            }
        }
    }

    async fn toggle(&self, invocation: &Invocation, now: i64) -> Result<Vec<String>> {
        let mut target = self.store.load(invocation.guild).await?;
        target.enabled = !target.enabled;
        self.store.save_settings(&target).await?;
        info!(guild = %invocation.guild, enabled = target.enabled, "Master switch toggled");

        if !target.enabled {
            return Ok(vec!["🛑 Free game checks are now **disabled**.".to_string()]);
        }

        let mut replies = vec!["✅ Free game checks are now **enabled**.".to_string()];
        let outcome = self
            .check
            .evaluate(
                &target,
                now,
                CheckPolicy::on_enable(self.dedupe_on_enable),
                Some(invocation.channel),
            )
            .await;
        replies.extend(self.describe_outcome(&outcome, invocation.channel));
        Ok(replies)
    }

    async fn show_channel(&self, guild: GuildId) -> Result<Vec<String>> {
        let target = self.store.load(guild).await?;
        let reply = match target.channel {
            None => format!(
                "⚠ No channel has been set yet. Use `{} channel #channel` to set one.",
                self.root()
            ),
            Some(channel) => {
                if self.check.notifier().channel_exists(guild, channel).await {
                    format!("📌 Free game deals will be posted in: {}", channel.mention())
                } else {
                    "⚠ A channel was set previously, but I can't find it. Please set a new one."
                        .to_string()
                }
            }
        };
        Ok(vec![reply])
    }

    async fn set_channel(&self, guild: GuildId, channel: ChannelId) -> Result<Vec<String>> {
        if !self.check.notifier().channel_exists(guild, channel).await {
            return Ok(vec!["⚠ I can't find that channel.".to_string()]);
        }

        let mut target = self.store.load(guild).await?;
        let previous = target.channel.replace(channel);
        self.store.save_settings(&target).await?;
        info!(guild = %guild, channel = %channel, "Destination channel set");

        let reply = match previous {
            None => format!("✅ Free game posts will now go to {}.", channel.mention()),
            Some(old) => format!(
                "🔄 Updated! Free game posts will now go to {} (was {}).",
                channel.mention(),
                old.mention()
            ),
        };
        Ok(vec![reply])
    }

    async fn toggle_store(&self, guild: GuildId, store: Storefront) -> Result<Vec<String>> {
        let mut target = self.store.load(guild).await?;
        let enabled = target.stores.toggle(store);
        self.store.save_settings(&target).await?;
        info!(guild = %guild, store = store.display_name(), enabled, "Store toggled");

        Ok(vec![if enabled {
            format!("✅ {}: Enabled", store.display_name())
        } else {
            format!("❌ {}: Disabled", store.display_name())
        }])
    }

    async fn ping_role(&self, guild: GuildId, arg: RoleArg) -> Result<Vec<String>> {
        let mut target: Target = self.store.load(guild).await?;

        let reply = match arg {
            RoleArg::Show => match target.ping_role {
                Some(role) => format!("🔔 Free game posts ping {}.", role.mention()),
                None => format!(
                    "🔕 No ping role is set. Use `{} ping_role @role` to set one.",
                    self.root()
                ),
            },
            RoleArg::Set(role) => {
                target.ping_role = Some(role);
                self.store.save_settings(&target).await?;
                info!(guild = %guild, role = %role, "Ping role set");
                format!("✅ Free game posts will now ping {}.", role.mention())
            }
            RoleArg::Clear => {
                target.ping_role = None;
                self.store.save_settings(&target).await?;
                info!(guild = %guild, "Ping role cleared");
                "🔕 Ping role cleared. Free game posts will not mention anyone.".to_string()
            }
        };
        Ok(vec![reply])
    }

    /// User-facing text for a command-triggered check.
    ///
    /// A post into the invoking channel needs no extra text; the notice itself
    /// is the answer.
    fn describe_outcome(&self, outcome: &CheckOutcome, invoked_in: ChannelId) -> Vec<String> {
        let text = match outcome {
            CheckOutcome::Posted { channel, .. } if *channel == invoked_in => return Vec::new(),
            CheckOutcome::Posted { deal, channel } => {
                format!("📨 Posted **{}** in {}.", deal.title, channel.mention())
            }
            CheckOutcome::PostedUnrecorded { deal, .. } => format!(
                "⚠ Posted **{}**, but I couldn't save that, so it may be posted again.",
                deal.title
            ),
            CheckOutcome::NoDestination => format!(
                "⚠ No channel has been set yet. Use `{} channel #channel` to set one.",
                self.root()
            ),
            CheckOutcome::NoStoresEnabled => format!(
                "⚠ No stores are currently enabled. Use `{} <store>` to enable some.",
                self.root()
            ),
            CheckOutcome::FetchFailed { .. } => format!(
                "⚠ Failed to fetch game deals from {}.",
                self.check.source_name()
            ),
            // Command checks bypass the switch and the cooldown.
            CheckOutcome::NoDeals | CheckOutcome::Disabled | CheckOutcome::CoolingDown { .. } => {
                "No free games found at the moment.".to_string()
            }
            CheckOutcome::Duplicate { deal } => {
                format!("Nothing new: **{}** was already posted.", deal.title)
            }
            CheckOutcome::ChannelMissing { channel } => format!(
                "⚠ I can't find {}. Please set a new channel with `{} channel #channel`.",
                channel.mention(),
                self.root()
            ),
            CheckOutcome::DeliveryFailed { channel, .. } => {
                format!("⚠ I couldn't post in {}. Check my permissions there.", channel.mention())
            }
        };
        vec![text]
    }
}
