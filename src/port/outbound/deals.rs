//! Deal source port.
//!
//! Abstracts the upstream aggregator so the check routine can be exercised
//! against scripted responses.

use async_trait::async_trait;

use crate::domain::{Deal, Storefront};
use crate::error::Result;

/// Fetches free-game deals from an upstream listing service.
#[async_trait]
pub trait DealSource: Send + Sync {
    /// Fetch deals priced at zero for the given stores.
    ///
    /// Results are returned in upstream order; callers trust that ordering.
    /// Non-success statuses and transport failures are errors. No retries.
    async fn free_deals(&self, stores: &[Storefront]) -> Result<Vec<Deal>>;

    /// Human-readable name of the upstream, used in replies and logs.
    fn source_name(&self) -> &'static str;
}
