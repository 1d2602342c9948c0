//! Resolve-or-fetch pipeline over the storefront fetchers and the cache.

use std::sync::Arc;

use prodcat_core::{AppConfig, ProductRecord, Sections, Variant};
use prodcat_scraper::client::extract_store_origin;
use prodcat_scraper::{extract_sections, ProductFeed, StoreClient};
use prodcat_scraper::extract::extract_page_title;

use crate::cache::ProductCache;
use crate::error::ServiceError;

/// Fetches, normalizes, and caches product records for one storefront.
///
/// Shared across tasks behind an `Arc`; all interior state (the cache) is
/// synchronized internally.
pub struct CatalogService {
    pub(crate) client: StoreClient,
    cache: ProductCache,
    pub(crate) config: AppConfig,
}

impl CatalogService {
    /// Builds the service with a cache of the configured capacity.
    ///
    /// # Errors
    ///
    /// Propagates [`prodcat_scraper::ScraperError::Http`] if the HTTP client
    /// cannot be constructed.
    pub fn new(config: AppConfig) -> Result<Self, ServiceError> {
        let client = StoreClient::new(config.request_timeout_secs, &config.user_agent)?;
        let cache = ProductCache::new(config.cache_capacity);
        Ok(Self {
            client,
            cache,
            config,
        })
    }

    /// Returns the cached record for `handle`, fetching and normalizing it
    /// on a miss. A cache hit makes no network requests.
    ///
    /// Returns `Ok(None)` when the handle resolves to no product.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Scraper`] only for configuration-level
    /// failures (invalid store URL); fetch failures are treated as absence.
    pub async fn ensure_product(
        &self,
        handle: &str,
    ) -> Result<Option<Arc<ProductRecord>>, ServiceError> {
        if let Some(record) = self.cache.get(handle) {
            tracing::debug!(handle, "cache hit");
            return Ok(Some(record));
        }
        self.fetch_and_cache(handle).await
    }

    /// Re-runs the full fetch+extract pipeline for `handle`, replacing any
    /// cached record. Used by bulk ingestion so re-ingesting always
    /// reflects the live page.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::ensure_product`].
    pub async fn refresh_product(
        &self,
        handle: &str,
    ) -> Result<Option<Arc<ProductRecord>>, ServiceError> {
        self.fetch_and_cache(handle).await
    }

    async fn fetch_and_cache(
        &self,
        handle: &str,
    ) -> Result<Option<Arc<ProductRecord>>, ServiceError> {
        let store_url = &self.config.store_url;

        let page = self.client.fetch_product_page(store_url, handle).await?;
        let feed = self.client.fetch_variant_feed(store_url, handle).await?;

        if page.is_none() && feed.is_none() {
            tracing::debug!(handle, "no page and no variant feed, treating as not found");
            return Ok(None);
        }

        let record = Arc::new(assemble_record(store_url, handle, page.as_deref(), feed));
        self.cache.insert(Arc::clone(&record));

        tracing::info!(
            handle,
            title = %record.title,
            variants = record.variants.len(),
            specs = record.sections.specifications.len(),
            "normalized product record"
        );
        Ok(Some(record))
    }

    /// Cached handles in insertion order.
    #[must_use]
    pub fn cached_handles(&self) -> Vec<String> {
        self.cache.handles()
    }

    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Assembles a normalized record from the raw page HTML and variant feed.
///
/// The feed supplies identity and variants; the page supplies sections.
/// When the feed is absent the title falls back to the HTML page title,
/// then to the handle itself.
fn assemble_record(
    store_url: &str,
    handle: &str,
    page: Option<&str>,
    feed: Option<ProductFeed>,
) -> ProductRecord {
    let sections = page.map_or_else(Sections::default, extract_sections);

    let (title, vendor, variants) = match feed {
        Some(feed) => {
            let variants = feed.variants.into_iter().map(feed_variant).collect();
            (feed.title, feed.vendor, variants)
        }
        None => {
            let title = page
                .and_then(extract_page_title)
                .unwrap_or_else(|| handle.to_owned());
            (title, None, Vec::new())
        }
    };

    let origin = extract_store_origin(store_url);
    let url = format!("{origin}/products/{handle}");

    ProductRecord::new(handle.to_owned(), title, url, vendor, variants, sections)
}

fn feed_variant(v: prodcat_scraper::types::FeedVariant) -> Variant {
    Variant {
        id: v.id,
        title: v.title,
        sku: v.sku,
        barcode: v.barcode,
        available: v.available,
        price_cents: v.price,
        compare_at_cents: v.compare_at_price,
        options: v.options,
        weight_grams: v.weight,
    }
}
