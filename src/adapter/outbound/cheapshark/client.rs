//! CheapShark REST API client.
//!
//! One request per check: `GET /api/1.0/deals` filtered by store ids and a
//! price ceiling of zero. The upstream ordering is kept as-is.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use super::dto::DealRecord;
use super::settings::CheapSharkConfig;
use crate::domain::{Deal, Storefront};
use crate::error::{Error, Result};
use crate::port::DealSource;

/// Price ceiling sent upstream; only free deals are of interest.
const UPPER_PRICE: u32 = 0;

/// HTTP client for the CheapShark deals listing.
pub struct CheapSharkClient {
    http: HttpClient,
    base_url: String,
}

impl CheapSharkClient {
    /// Build a client with the configured request and connect timeouts.
    pub fn from_config(config: &CheapSharkConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .user_agent(concat!("freegames/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Listing URL for the given stores, e.g.
    /// `https://www.cheapshark.com/api/1.0/deals?storeID=1,7&upperPrice=0`.
    #[must_use]
    pub fn deals_url(&self, stores: &[Storefront]) -> String {
        let ids = stores
            .iter()
            .map(|store| store.id().to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{}/api/1.0/deals?storeID={ids}&upperPrice={UPPER_PRICE}",
            self.base_url
        )
    }
}

#[async_trait]
impl DealSource for CheapSharkClient {
    async fn free_deals(&self, stores: &[Storefront]) -> Result<Vec<Deal>> {
        let url = self.deals_url(stores);
        debug!(url = %url, "Fetching free deals");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let records: Vec<DealRecord> = response.json().await?;
        debug!(count = records.len(), "Fetched free deals");
        Ok(records.into_iter().map(Deal::from).collect())
    }

    fn source_name(&self) -> &'static str {
        "CheapShark"
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;

    fn client_for(base_url: &str) -> CheapSharkClient {
        CheapSharkClient::from_config(&CheapSharkConfig {
            base_url: base_url.to_string(),
            timeout_ms: 2_000,
            ..CheapSharkConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn url_lists_store_ids_and_zero_price() {
        let client = client_for("https://www.cheapshark.com/");
        assert_eq!(
            client.deals_url(&[Storefront::Steam, Storefront::Gog]),
            "https://www.cheapshark.com/api/1.0/deals?storeID=1,7&upperPrice=0"
        );
        assert_eq!(
            client.deals_url(&Storefront::ALL),
            "https://www.cheapshark.com/api/1.0/deals?storeID=1,7,15,25,30&upperPrice=0"
        );
    }

    #[tokio::test]
    async fn returns_deals_in_upstream_order() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/1.0/deals")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("storeID".into(), "1,7".into()),
                Matcher::UrlEncoded("upperPrice".into(), "0".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"dealID": "42", "title": "Foo", "storeID": "1", "thumb": "u"},
                    {"dealID": "43", "title": "Bar", "storeID": "7", "thumb": "v"}
                ]"#,
            )
            .create_async()
            .await;

        let deals = client_for(&server.url())
            .free_deals(&[Storefront::Steam, Storefront::Gog])
            .await
            .unwrap();

        assert_eq!(
            deals,
            vec![
                Deal::new("42", "Foo", "1", "u"),
                Deal::new("43", "Bar", "7", "v"),
            ]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server.url())
            .free_deals(&[Storefront::Steam])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UpstreamStatus { status: 503 }));
    }

    #[tokio::test]
    async fn empty_array_is_no_deals() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let deals = client_for(&server.url())
            .free_deals(&[Storefront::Steam])
            .await
            .unwrap();
        assert!(deals.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body("{\"oops\": true}")
            .create_async()
            .await;

        let result = client_for(&server.url())
            .free_deals(&[Storefront::Steam])
            .await;
        assert!(matches!(result, Err(Error::Http(_))));
    }
}
