use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::models::{ExternalProduct, UpstreamProductResponse, UpstreamSearchResponse};

pub const USER_AGENT: &str = concat!(
    "food-inventory-service/",
    env!("CARGO_PKG_VERSION"),
    " (inventory barcode lookup)"
);

#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Connection failures and timeouts.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Thin client for the open food-product database.
///
/// One GET per call, no retries and no caching. `reqwest::Client` pools
/// connections internally, so one instance is shared by all handlers.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    search_limit: usize,
}

impl UpstreamClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        search_limit: usize,
    ) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(UpstreamError::Transport)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            search_limit,
        })
    }

    pub fn search_limit(&self) -> usize {
        self.search_limit
    }

    /// `Ok(None)` when the upstream answered but does not know the barcode.
    pub async fn fetch_product(
        &self,
        barcode: &str,
    ) -> Result<Option<ExternalProduct>, UpstreamError> {
        let url = format!("{}/api/v0/product/{}.json", self.base_url, barcode);
        debug!(%url, "Fetching upstream product");

        let body: UpstreamProductResponse = self.get_json(self.http.get(&url)).await?;

        Ok(body
            .into_found()
            .map(|product| ExternalProduct::from_upstream(product, Some(barcode))))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<ExternalProduct>, UpstreamError> {
        let url = format!("{}/cgi/search.pl", self.base_url);
        let page_size = self.search_limit.to_string();
        debug!(%url, query, "Searching upstream products");

        let request = self.http.get(&url).query(&[
            ("search_terms", query),
            ("search_simple", "1"),
            ("action", "process"),
            ("json", "1"),
            ("page_size", page_size.as_str()),
        ]);
        let body: UpstreamSearchResponse = self.get_json(request).await?;

        Ok(body
            .products
            .into_iter()
            .take(self.search_limit)
            .map(|product| ExternalProduct::from_upstream(product, None))
            .collect())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, UpstreamError> {
        let response = request.send().await.map_err(UpstreamError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpstreamError::Status(status));
        }

        response.json::<T>().await.map_err(UpstreamError::Decode)
    }
}
