//! Command handlers, called from `main` after config and logging are set up.
//!
//! Each handler builds the service layer it needs; the service (and its
//! product cache) lives for the duration of one invocation.

use std::sync::Arc;
use std::time::Duration;

use prodcat_core::AppConfig;
use prodcat_scraper::infer_facets;
use prodcat_service::{CatalogService, IngestOptions, JobManager, SearchService};

/// Resolve one handle and print the normalized record as pretty JSON.
pub(crate) async fn run_fetch(config: AppConfig, handle: &str) -> anyhow::Result<()> {
    let service = CatalogService::new(config)?;
    match service.ensure_product(handle).await? {
        Some(record) => {
            tracing::info!(
                handle = %handle,
                specs = record.sections.specifications.len(),
                "product resolved"
            );
            println!("{}", serde_json::to_string_pretty(record.as_ref())?);
            Ok(())
        }
        None => anyhow::bail!("product '{handle}' not found"),
    }
}

/// Run the three-tier search and print the tier plus ranked matches.
pub(crate) async fn run_search(config: AppConfig, query: &str, limit: usize) -> anyhow::Result<()> {
    let search = SearchService::new(config)?;
    let outcome = search.search(query, limit).await?;
    tracing::info!(
        query = %query,
        tier = ?outcome.tier,
        count = outcome.matches.len(),
        "search complete"
    );

    if outcome.matches.is_empty() {
        println!("no matches for '{query}'");
        return Ok(());
    }

    println!("{} matches (tier: {:?})", outcome.matches.len(), outcome.tier);
    for m in &outcome.matches {
        println!("  {}  {}", m.handle, m.title);
    }
    Ok(())
}

/// Start a bulk ingestion job and poll its status until completion.
///
/// Exits non-zero when every handle failed.
pub(crate) async fn run_ingest(
    config: AppConfig,
    handles: Vec<String>,
    all: bool,
    max: Option<usize>,
    concurrency: Option<usize>,
) -> anyhow::Result<()> {
    if !all && handles.is_empty() {
        anyhow::bail!("pass --handles h1,h2,... or --all");
    }

    let service = Arc::new(CatalogService::new(config)?);
    let manager = JobManager::new(Arc::clone(&service));
    let opts = IngestOptions {
        concurrency,
        ..IngestOptions::default()
    };

    let params = if all {
        manager.start_full_catalog(opts, max).await?
    } else {
        manager.start(handles, opts)?
    };
    tracing::info!(
        total = params.total,
        workers = params.concurrency,
        "ingestion job started"
    );
    println!(
        "ingesting {} handles ({} workers, {}s timeout, {} retries)",
        params.total, params.concurrency, params.task_timeout_secs, params.max_retries
    );

    let status = loop {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let Some(status) = manager.status() else {
            anyhow::bail!("job status unavailable");
        };
        println!(
            "  done {}/{} ({} failed, {} in flight, {} queued)",
            status.done + status.failed,
            status.total,
            status.failed,
            status.in_flight.len(),
            status.queued
        );
        if status.is_complete() {
            break status;
        }
    };

    println!(
        "finished: {} ok, {} failed of {} ({} cached)",
        status.done,
        status.failed,
        status.total,
        service.cache_len()
    );
    for failure in &status.recent_errors {
        tracing::warn!(handle = %failure.handle, error = %failure.error, "handle failed to ingest");
        println!("  failed {}: {}", failure.handle, failure.error);
    }

    if status.done == 0 {
        anyhow::bail!("all {} handles failed", status.total);
    }
    Ok(())
}

/// Resolve one handle and print its inferred facets.
pub(crate) async fn run_facets(config: AppConfig, handle: &str) -> anyhow::Result<()> {
    let service = CatalogService::new(config)?;
    match service.ensure_product(handle).await? {
        Some(record) => {
            let facets = infer_facets(&record);
            println!("{}", serde_json::to_string_pretty(&facets)?);
            Ok(())
        }
        None => anyhow::bail!("product '{handle}' not found"),
    }
}
