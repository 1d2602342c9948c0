//! Catalog service layer: resolve-or-fetch, bounded cache, tiered search,
//! and the bulk ingestion controller.
//!
//! Everything here composes the `prodcat-scraper` fetchers with the
//! `prodcat-core` domain types. The service owns a process-wide product
//! cache and at most one running bulk ingestion job.

pub mod cache;
pub mod error;
pub mod ingest;
pub mod search;
pub mod service;

pub use cache::ProductCache;
pub use error::ServiceError;
pub use ingest::{IngestOptions, JobManager};
pub use search::{SearchMatch, SearchOutcome, SearchService, SearchTier};
pub use service::CatalogService;
