//! Service-level error types.

use thiserror::Error;

use prodcat_scraper::ScraperError;

/// Errors surfaced by the catalog service and the bulk ingestion controller.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Scraper(#[from] ScraperError),

    /// A bulk job was requested while one is already running. Requests are
    /// rejected, never queued.
    #[error("a bulk ingestion job is already running")]
    JobAlreadyRunning,

    #[error("bulk ingestion requires at least one handle")]
    EmptyJob,

    /// The handle resolved to no product page. Within a bulk job this is a
    /// per-handle failure, never batch-fatal.
    #[error("product not found: {handle}")]
    ProductNotFound { handle: String },

    #[error("task for {handle} timed out after {timeout_secs}s")]
    TaskTimeout { handle: String, timeout_secs: u64 },
}
