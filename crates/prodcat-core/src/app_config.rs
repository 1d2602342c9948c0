use std::fmt;

/// Application configuration resolved from `PRODCAT_*` environment
/// variables. See [`crate::config::load_app_config`].
#[derive(Clone)]
pub struct AppConfig {
    /// Storefront base URL; path segments are stripped to the origin by the
    /// scraper client.
    pub store_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Items requested per catalog listing page (storefront max 250).
    pub catalog_page_limit: u32,
    /// Delay between paged catalog requests during search scans.
    pub inter_page_delay_ms: u64,
    /// Bounded product cache capacity (FIFO eviction).
    pub cache_capacity: usize,
    pub ingest_concurrency: usize,
    pub ingest_task_timeout_secs: u64,
    /// Additional attempts after the first failure of an ingest task.
    pub ingest_max_retries: u32,
    /// Base for linear retry backoff: wait `backoff_ms * attempt` before
    /// the n-th retry.
    pub ingest_retry_backoff_ms: u64,
    /// Pacing delay between a task slot freeing and the next dispatch.
    pub ingest_pacing_delay_ms: u64,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("store_url", &self.store_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("catalog_page_limit", &self.catalog_page_limit)
            .field("inter_page_delay_ms", &self.inter_page_delay_ms)
            .field("cache_capacity", &self.cache_capacity)
            .field("ingest_concurrency", &self.ingest_concurrency)
            .field("ingest_task_timeout_secs", &self.ingest_task_timeout_secs)
            .field("ingest_max_retries", &self.ingest_max_retries)
            .field("ingest_retry_backoff_ms", &self.ingest_retry_backoff_ms)
            .field("ingest_pacing_delay_ms", &self.ingest_pacing_delay_ms)
            .finish()
    }
}
