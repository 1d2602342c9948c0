//! Three-tier catalog search: suggestion lookup, exact catalog scan, fuzzy
//! scored scan.

use std::time::Duration;

use serde::Serialize;

use prodcat_core::AppConfig;
use prodcat_scraper::{CatalogProduct, StoreClient};

use crate::error::ServiceError;

/// Hard cap on catalog pages walked during a search scan.
const MAX_SCAN_PAGES: u32 = 200;

/// Query words shorter than this carry no signal and are stripped.
const MIN_WORD_LEN: usize = 3;

/// Common words stripped from queries before matching.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "this", "that", "are", "was", "you",
];

/// Which tier produced a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTier {
    Suggest,
    Exact,
    Fuzzy,
}

/// One ranked search hit.
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    pub handle: String,
    pub title: String,
}

/// The tier that produced the matches, and the matches themselves.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub tier: SearchTier,
    pub matches: Vec<SearchMatch>,
}

/// Resolves free-text queries to ranked product handles.
pub struct SearchService {
    client: StoreClient,
    config: AppConfig,
}

impl SearchService {
    /// # Errors
    ///
    /// Propagates [`prodcat_scraper::ScraperError::Http`] if the HTTP client
    /// cannot be constructed.
    pub fn new(config: AppConfig) -> Result<Self, ServiceError> {
        let client = StoreClient::new(config.request_timeout_secs, &config.user_agent)?;
        Ok(Self { client, config })
    }

    /// Runs the tiers in order and returns the first non-empty result.
    ///
    /// The suggestion tier is best-effort: its errors degrade to an empty
    /// result so the catalog scans still run. Catalog scan errors propagate.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Scraper`] when a catalog scan fails.
    pub async fn search(&self, query: &str, limit: usize) -> Result<SearchOutcome, ServiceError> {
        let suggested = self.suggest_tier(query).await;
        if !suggested.is_empty() {
            return Ok(SearchOutcome {
                tier: SearchTier::Suggest,
                matches: suggested,
            });
        }

        let words = significant_words(query);
        if words.is_empty() {
            tracing::debug!(query, "no significant query words, skipping catalog scans");
            return Ok(SearchOutcome {
                tier: SearchTier::Fuzzy,
                matches: Vec::new(),
            });
        }

        let exact = self.exact_tier(&words, limit).await?;
        if !exact.is_empty() {
            return Ok(SearchOutcome {
                tier: SearchTier::Exact,
                matches: exact,
            });
        }

        let fuzzy = self.fuzzy_tier(&words, limit).await?;
        Ok(SearchOutcome {
            tier: SearchTier::Fuzzy,
            matches: fuzzy,
        })
    }

    /// Storefront suggestion lookup, up to 5 candidates in upstream order.
    /// Any error degrades to an empty result.
    async fn suggest_tier(&self, query: &str) -> Vec<SearchMatch> {
        match self
            .client
            .fetch_suggestions(&self.config.store_url, query, 5)
            .await
        {
            Ok(suggestions) => suggestions
                .into_iter()
                .map(|s| SearchMatch {
                    handle: s.handle,
                    title: s.title,
                })
                .collect(),
            Err(e) => {
                tracing::warn!(query, error = %e, "suggestion lookup failed, falling through to catalog scan");
                Vec::new()
            }
        }
    }

    /// Paged scan requiring every significant word in the title or handle.
    /// Short-circuits once `limit` matches are found.
    async fn exact_tier(
        &self,
        words: &[String],
        limit: usize,
    ) -> Result<Vec<SearchMatch>, ServiceError> {
        let mut matches = Vec::new();

        self.scan_catalog(|product| {
            let haystack = format!(
                "{} {}",
                product.title.to_lowercase(),
                product.handle.to_lowercase()
            );
            if words.iter().all(|w| haystack.contains(w.as_str())) {
                matches.push(SearchMatch {
                    handle: product.handle,
                    title: product.title,
                });
            }
            matches.len() < limit
        })
        .await?;

        matches.truncate(limit);
        Ok(matches)
    }

    /// Full paged scan scoring candidates by matching word count. At least
    /// one word must match; ranked by score descending, ties broken by
    /// shorter title.
    async fn fuzzy_tier(
        &self,
        words: &[String],
        limit: usize,
    ) -> Result<Vec<SearchMatch>, ServiceError> {
        let mut scored: Vec<(usize, SearchMatch)> = Vec::new();

        self.scan_catalog(|product| {
            let haystack = format!(
                "{} {}",
                product.title.to_lowercase(),
                product.handle.to_lowercase()
            );
            let score = words
                .iter()
                .filter(|w| haystack.contains(w.as_str()))
                .count();
            if score > 0 {
                scored.push((
                    score,
                    SearchMatch {
                        handle: product.handle,
                        title: product.title,
                    },
                ));
            }
            true
        })
        .await?;

        scored.sort_by(|(sa, ma), (sb, mb)| sb.cmp(sa).then(ma.title.len().cmp(&mb.title.len())));
        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(_, m)| m)
            .collect())
    }

    /// Walks the paged catalog, feeding every product to `visit` in listing
    /// order. `visit` returns `false` to stop the scan early. A short page
    /// ends the scan; the configured inter-page delay applies between pages.
    async fn scan_catalog<F>(&self, mut visit: F) -> Result<(), ServiceError>
    where
        F: FnMut(CatalogProduct) -> bool,
    {
        let limit = self.config.catalog_page_limit;
        let mut page = 1u32;

        loop {
            if page > MAX_SCAN_PAGES {
                tracing::warn!(max_pages = MAX_SCAN_PAGES, "search scan hit the page cap");
                return Ok(());
            }

            if page > 1 && self.config.inter_page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.inter_page_delay_ms)).await;
            }

            let products = self
                .client
                .fetch_catalog_page(&self.config.store_url, page, limit)
                .await?;
            let page_len = products.len();

            for product in products {
                if !visit(product) {
                    return Ok(());
                }
            }

            if page_len < limit as usize {
                return Ok(());
            }
            page += 1;
        }
    }
}

/// Lowercased query words with stop words and short words removed.
fn significant_words(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|w| w.len() >= MIN_WORD_LEN && !STOP_WORDS.contains(&w.as_str()))
        .collect()
}
