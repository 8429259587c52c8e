//! CheapShark client configuration.

use serde::Deserialize;

use crate::application::DEFAULT_REDIRECT_PREFIX;

/// Deals API endpoint and HTTP limits.
#[derive(Debug, Clone, Deserialize)]
pub struct CheapSharkConfig {
    /// API root; `/api/1.0/deals` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Deal link prefix; the deal id is appended verbatim.
    #[serde(default = "default_redirect_url")]
    pub redirect_url: String,
    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://www.cheapshark.com".into()
}

fn default_redirect_url() -> String {
    DEFAULT_REDIRECT_PREFIX.into()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    3_000
}

impl Default for CheapSharkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            redirect_url: default_redirect_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}
