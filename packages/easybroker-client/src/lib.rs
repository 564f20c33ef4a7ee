//! Pure EasyBroker REST API client.
//!
//! A minimal client for the EasyBroker v1 API plus the two page-aggregation
//! strategies built on top of it: bounded page-range retrieval and exhaustive
//! status-filtered retrieval with next-page link chaining.
//!
//! # Example
//!
//! ```rust,ignore
//! use easybroker_client::{fetch, EasyBrokerClient, PropertyStatus};
//!
//! let client = EasyBrokerClient::new("your-api-key".into());
//!
//! // Everything currently published, across all pages.
//! let listings = fetch::fetch_all(&client, &[PropertyStatus::Published], &[]).await?;
//!
//! // Full detail records, fanned out and keyed by public id.
//! let ids: Vec<String> = listings.iter().map(|p| p.public_id.clone()).collect();
//! let details = fetch::fetch_details(&client, &ids).await?;
//! ```

pub mod error;
pub mod fetch;
pub mod testing;
pub mod types;

pub use error::{EasyBrokerError, Result};
pub use types::{
    AgentSummary, DetailLocation, ListQuery, Operation, Pagination, PropertyDetails, PropertyImage,
    PropertyPage, PropertyStatus, PropertySummary,
};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

const BASE_URL: &str = "https://api.easybroker.com/v1";

/// The listing source seam.
///
/// `EasyBrokerClient` is the HTTP implementation; tests use
/// [`testing::MockPropertyApi`] to exercise the aggregation strategies in
/// [`fetch`] without a network.
#[async_trait]
pub trait PropertyApi: Send + Sync {
    /// Fetch one listing page by query (page number, limit, filters).
    async fn list_page(&self, query: &ListQuery) -> Result<PropertyPage>;

    /// Dereference a server-supplied next-page URL verbatim.
    async fn follow_page(&self, next_page_url: &str) -> Result<PropertyPage>;

    /// Fetch the full detail record for one property.
    async fn property_details(&self, public_id: &str) -> Result<PropertyDetails>;
}

pub struct EasyBrokerClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl EasyBrokerClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (staging, local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let resp = self
            .client
            .get(url)
            .query(params)
            .header("X-Authorization", &self.api_key)
            .header("accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EasyBrokerError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl PropertyApi for EasyBrokerClient {
    async fn list_page(&self, query: &ListQuery) -> Result<PropertyPage> {
        let url = format!("{}/properties", self.base_url);
        self.get_json(&url, &query.to_params()).await
    }

    async fn follow_page(&self, next_page_url: &str) -> Result<PropertyPage> {
        // The API hands back a complete URL; validate it before dereferencing.
        url::Url::parse(next_page_url).map_err(|_| EasyBrokerError::InvalidNextPage {
            url: next_page_url.to_string(),
        })?;
        self.get_json(next_page_url, &[]).await
    }

    async fn property_details(&self, public_id: &str) -> Result<PropertyDetails> {
        let url = format!("{}/properties/{}", self.base_url, public_id);
        self.get_json(&url, &[]).await
    }
}
