//! Catalog listing and suggestion lookup for `StoreClient`.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::ScraperError;
use crate::types::{CatalogProduct, CatalogResponse, SuggestResponse, Suggestion};

use super::extract_store_origin;
use super::StoreClient;

/// Hard cap on catalog pages walked by [`StoreClient::fetch_all_handles`].
/// Guards against a storefront that keeps serving full pages forever.
pub(super) const MAX_PAGES: u32 = 200;

impl StoreClient {
    /// Fetches one page of the paged catalog listing
    /// (`/products.json?limit=N&page=P`, 1-based pages).
    ///
    /// A returned page shorter than `limit` signals the last page; callers
    /// drive the loop and apply inter-page pacing.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`] — HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ScraperError::Http`] — network or TLS failure.
    /// - [`ScraperError::Deserialize`] — response body is not a catalog page.
    pub async fn fetch_catalog_page(
        &self,
        store_url: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<CatalogProduct>, ScraperError> {
        let origin = extract_store_origin(store_url);
        let url = format!("{origin}/products.json?limit={limit}&page={page}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound { url });
        }
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed =
            serde_json::from_str::<CatalogResponse>(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("catalog page {page} from {store_url}"),
                source: e,
            })?;

        Ok(parsed.products)
    }

    /// Walks the full paged catalog and returns every product handle in
    /// listing order, stopping at the first short page.
    ///
    /// `inter_page_delay_ms` is applied between page requests (after every
    /// page except the first). `max_handles` optionally caps the result and
    /// short-circuits the walk.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_catalog_page`].
    pub async fn fetch_all_handles(
        &self,
        store_url: &str,
        limit: u32,
        inter_page_delay_ms: u64,
        max_handles: Option<usize>,
    ) -> Result<Vec<String>, ScraperError> {
        let mut handles: Vec<String> = Vec::new();
        let mut page = 1u32;

        loop {
            if page > MAX_PAGES {
                tracing::warn!(
                    store_url,
                    max_pages = MAX_PAGES,
                    "catalog walk hit the page cap — returning what was collected"
                );
                break;
            }

            if page > 1 && inter_page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_page_delay_ms)).await;
            }

            let products = self.fetch_catalog_page(store_url, page, limit).await?;
            let page_len = products.len();
            handles.extend(products.into_iter().map(|p| p.handle));

            if let Some(cap) = max_handles {
                if handles.len() >= cap {
                    handles.truncate(cap);
                    break;
                }
            }

            // Short page: end of catalog.
            if page_len < limit as usize {
                break;
            }
            page += 1;
        }

        Ok(handles)
    }

    /// Phrase suggestion lookup
    /// (`/search/suggest.json?q=...&resources[type]=product`).
    ///
    /// Returns up to `limit` candidate handle/title pairs ranked by the
    /// storefront. The query is percent-encoded.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] / [`ScraperError::NotFound`] —
    ///   non-2xx status.
    /// - [`ScraperError::Http`] — network failure.
    /// - [`ScraperError::Deserialize`] — unexpected response shape.
    pub async fn fetch_suggestions(
        &self,
        store_url: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Suggestion>, ScraperError> {
        let origin = extract_store_origin(store_url);
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC);
        let url = format!(
            "{origin}/search/suggest.json?q={encoded}&resources%5Btype%5D=product&resources%5Blimit%5D={limit}"
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound { url });
        }
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed =
            serde_json::from_str::<SuggestResponse>(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("suggestions for \"{query}\" from {store_url}"),
                source: e,
            })?;

        let mut suggestions = parsed.resources.results.products;
        suggestions.truncate(limit as usize);
        Ok(suggestions)
    }
}
