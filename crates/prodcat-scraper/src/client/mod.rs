//! HTTP client for the storefront's product pages and machine-readable feeds.

mod catalog;
mod origin;

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::types::ProductFeed;

pub use origin::extract_store_origin;

/// HTTP client for one storefront's per-product endpoints.
///
/// Fetching a product page treats *any* failure — non-2xx status, network
/// error, unreadable body — as absence (`Ok(None)`), never as a hard error.
/// The same holds for the variant feed. Retry is not this layer's concern;
/// the bulk ingestion controller layers retry on top of the full
/// fetch+extract pipeline.
pub struct StoreClient {
    pub(super) client: Client,
}

impl StoreClient {
    /// Creates a `StoreClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the HTML page for one product handle.
    ///
    /// Returns `Ok(None)` when the handle does not resolve to a product:
    /// 404, any other non-2xx status, or a network-level failure. The body
    /// text is returned as-is on success.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidStoreUrl`] only when the configured
    /// store URL cannot be turned into a request URL.
    pub async fn fetch_product_page(
        &self,
        store_url: &str,
        handle: &str,
    ) -> Result<Option<String>, ScraperError> {
        let url = Self::product_url(store_url, handle, "")?;

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(handle, url, error = %e, "product page fetch failed — treating as absent");
                return Ok(None);
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(handle, url, status = status.as_u16(), "non-success status for product page");
            return Ok(None);
        }

        match response.text().await {
            Ok(body) => Ok(Some(body)),
            Err(e) => {
                tracing::warn!(handle, url, error = %e, "failed to read product page body — treating as absent");
                Ok(None)
            }
        }
    }

    /// Fetches the machine-readable variant feed for one handle
    /// (`/products/{handle}.js`, prices in integer cents).
    ///
    /// Best-effort by contract: any failure — HTTP, network, or a body that
    /// does not deserialize — yields `Ok(None)` so extraction can proceed
    /// with an empty variant list.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidStoreUrl`] only when the configured
    /// store URL cannot be turned into a request URL.
    pub async fn fetch_variant_feed(
        &self,
        store_url: &str,
        handle: &str,
    ) -> Result<Option<ProductFeed>, ScraperError> {
        let url = Self::product_url(store_url, handle, ".js")?;

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(handle, url, error = %e, "variant feed fetch failed");
                return Ok(None);
            }
        };

        if !response.status().is_success() {
            tracing::debug!(
                handle,
                url,
                status = response.status().as_u16(),
                "non-success status for variant feed"
            );
            return Ok(None);
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!(handle, url, error = %e, "failed to read variant feed body");
                return Ok(None);
            }
        };

        match serde_json::from_str::<ProductFeed>(&body) {
            Ok(feed) => Ok(Some(feed)),
            Err(e) => {
                tracing::warn!(handle, url, error = %e, "variant feed did not deserialize — continuing without variants");
                Ok(None)
            }
        }
    }

    /// Builds `{origin}/products/{handle}{suffix}`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidStoreUrl`] if the extracted origin
    /// cannot be parsed as a valid URL base.
    fn product_url(store_url: &str, handle: &str, suffix: &str) -> Result<String, ScraperError> {
        let origin = extract_store_origin(store_url);
        let base = format!("{origin}/products/{handle}{suffix}");
        reqwest::Url::parse(&base)
            .map_err(|e| ScraperError::InvalidStoreUrl {
                store_url: store_url.to_owned(),
                reason: format!("origin \"{origin}\" is not a valid URL base: {e}"),
            })
            .map(|u| u.to_string())
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
