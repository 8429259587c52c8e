//! CheapShark wire types.

use serde::Deserialize;

use crate::domain::Deal;

/// One element of the `/deals` response array.
///
/// Only the fields the bot uses are decoded; the API sends many more.
#[derive(Debug, Clone, Deserialize)]
pub struct DealRecord {
    #[serde(rename = "dealID")]
    pub deal_id: String,
    pub title: String,
    #[serde(rename = "storeID")]
    pub store_id: String,
    #[serde(default)]
    pub thumb: String,
}

impl From<DealRecord> for Deal {
    fn from(record: DealRecord) -> Self {
        Deal::new(record.deal_id, record.title, record.store_id, record.thumb)
    }
}
