//! Background poller configuration.

use std::time::Duration;

use serde::Deserialize;

/// Poll cadence, per-target cooldown and the toggle-on dedupe choice.
#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// How often the poller wakes up, in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Minimum seconds between two background posts to the same guild.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
    /// Whether switching checks on skips a deal that was already posted.
    #[serde(default = "default_dedupe_on_enable")]
    pub dedupe_on_enable: bool,
}

const fn default_interval_secs() -> u64 {
    600
}

const fn default_cooldown_secs() -> u64 {
    10_800
}

const fn default_dedupe_on_enable() -> bool {
    true
}

impl PollerConfig {
    /// Wake interval as a [`Duration`].
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Cooldown in signed seconds, as compared against unix timestamps.
    #[must_use]
    pub fn cooldown(&self) -> i64 {
        i64::try_from(self.cooldown_secs).unwrap_or(i64::MAX)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            cooldown_secs: default_cooldown_secs(),
            dedupe_on_enable: default_dedupe_on_enable(),
        }
    }
}
