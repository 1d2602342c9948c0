//! Integration tests for the bulk ingestion controller: batch accounting,
//! dedup, single-job exclusivity, retry, timeout, cancellation, and
//! bounded concurrency.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prodcat_core::{AppConfig, JobStatus};
use prodcat_service::{CatalogService, IngestOptions, JobManager, ServiceError};

fn test_config(store_url: &str) -> AppConfig {
    AppConfig {
        store_url: store_url.to_owned(),
        log_level: "info".into(),
        request_timeout_secs: 5,
        user_agent: "prodcat-test/0.1".into(),
        catalog_page_limit: 250,
        inter_page_delay_ms: 0,
        cache_capacity: 50,
        ingest_concurrency: 2,
        ingest_task_timeout_secs: 5,
        ingest_max_retries: 0,
        ingest_retry_backoff_ms: 0,
        ingest_pacing_delay_ms: 0,
    }
}

fn manager_for(config: AppConfig) -> JobManager {
    let service = Arc::new(CatalogService::new(config).unwrap());
    JobManager::new(service)
}

fn feed_json(handle: &str) -> serde_json::Value {
    json!({
        "id": 1,
        "title": format!("Product {handle}"),
        "handle": handle,
        "variants": [{"id": 2, "title": "Default Title", "price": 9900}]
    })
}

/// Mounts healthy page + feed mocks for one handle, optionally delaying
/// each response.
async fn mount_product(server: &MockServer, handle: &str, delay_ms: u64) {
    let page = ResponseTemplate::new(200)
        .set_body_string("<html><head><title>ok</title></head><body></body></html>")
        .set_delay(Duration::from_millis(delay_ms));
    let feed = ResponseTemplate::new(200)
        .set_body_json(&feed_json(handle))
        .set_delay(Duration::from_millis(delay_ms));

    Mock::given(method("GET"))
        .and(path(format!("/products/{handle}")))
        .respond_with(page)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/products/{handle}.js")))
        .respond_with(feed)
        .mount(server)
        .await;
}

/// Mounts 404s for both endpoints so the handle always fails as not-found.
async fn mount_missing(server: &MockServer, handle: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/products/{handle}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/products/{handle}.js")))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

async fn wait_for_completion(manager: &JobManager) -> JobStatus {
    for _ in 0..1000 {
        if let Some(status) = manager.status() {
            if status.is_complete() {
                return status;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job did not complete within 10s");
}

fn handles(list: &[&str]) -> Vec<String> {
    list.iter().map(|h| (*h).to_owned()).collect()
}

#[tokio::test]
async fn batch_accounting_with_one_failing_handle() {
    let server = MockServer::start().await;
    mount_product(&server, "a", 0).await;
    mount_missing(&server, "b").await;
    mount_product(&server, "c", 0).await;

    let manager = manager_for(test_config(&server.uri()));
    let params = manager
        .start(handles(&["a", "b", "c"]), IngestOptions::default())
        .unwrap();
    assert_eq!(params.total, 3);

    let status = wait_for_completion(&manager).await;
    assert_eq!(status.done, 2);
    assert_eq!(status.failed, 1);
    assert_eq!(status.done + status.failed, status.total);
    assert_eq!(status.recent_errors.len(), 1);
    assert_eq!(status.recent_errors[0].handle, "b");
    assert!(status.recent_errors[0].error.contains("not found"));
    assert!(status.finished_at.is_some());
    assert!(status.in_flight.is_empty());
    assert_eq!(status.queued, 0);
}

#[tokio::test]
async fn duplicate_handles_are_deduped_preserving_first_occurrence() {
    let server = MockServer::start().await;
    mount_product(&server, "a", 0).await;
    mount_product(&server, "b", 0).await;

    let manager = manager_for(test_config(&server.uri()));
    let params = manager
        .start(handles(&["a", "b", "a", "a", "b"]), IngestOptions::default())
        .unwrap();

    assert_eq!(params.total, 2, "duplicates must collapse before counting");

    let status = wait_for_completion(&manager).await;
    assert_eq!(status.done, 2);
    assert_eq!(status.failed, 0);
}

#[tokio::test]
async fn empty_handle_list_is_rejected() {
    let server = MockServer::start().await;
    let manager = manager_for(test_config(&server.uri()));

    let result = manager.start(Vec::new(), IngestOptions::default());
    assert!(matches!(result, Err(ServiceError::EmptyJob)));
}

#[tokio::test]
async fn second_job_is_rejected_while_one_runs() {
    let server = MockServer::start().await;
    mount_product(&server, "slow", 200).await;

    let manager = manager_for(test_config(&server.uri()));
    manager
        .start(handles(&["slow"]), IngestOptions::default())
        .unwrap();

    let second = manager.start(handles(&["slow"]), IngestOptions::default());
    assert!(matches!(second, Err(ServiceError::JobAlreadyRunning)));

    // The first job must still run to completion.
    let status = wait_for_completion(&manager).await;
    assert_eq!(status.done, 1);
}

#[tokio::test]
async fn failed_task_is_retried_with_configured_attempts() {
    let server = MockServer::start().await;

    // 1 initial attempt + 2 retries = 3 hits on each endpoint.
    Mock::given(method("GET"))
        .and(path("/products/flaky"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/flaky.js"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    let manager = manager_for(test_config(&server.uri()));
    let opts = IngestOptions {
        max_retries: Some(2),
        ..IngestOptions::default()
    };
    manager.start(handles(&["flaky"]), opts).unwrap();

    let status = wait_for_completion(&manager).await;
    assert_eq!(status.failed, 1);
    assert_eq!(status.done, 0);
}

#[tokio::test]
async fn slow_task_fails_with_timeout() {
    let server = MockServer::start().await;
    // Response delay well past the 1s task timeout.
    mount_product(&server, "stuck", 3000).await;

    let manager = manager_for(test_config(&server.uri()));
    let opts = IngestOptions {
        task_timeout_secs: Some(1),
        ..IngestOptions::default()
    };
    manager.start(handles(&["stuck"]), opts).unwrap();

    let status = wait_for_completion(&manager).await;
    assert_eq!(status.failed, 1);
    assert_eq!(status.recent_errors.len(), 1);
    assert!(
        status.recent_errors[0].error.contains("timed out"),
        "unexpected error: {}",
        status.recent_errors[0].error
    );
}

#[tokio::test]
async fn cancellation_stops_dispatch_but_job_completes() {
    let server = MockServer::start().await;
    let all: Vec<String> = (0..10).map(|i| format!("p{i}")).collect();
    for handle in &all {
        mount_product(&server, handle, 50).await;
    }

    let manager = manager_for(test_config(&server.uri()));
    let opts = IngestOptions {
        concurrency: Some(1),
        ..IngestOptions::default()
    };
    manager.start(all, opts).unwrap();

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(manager.cancel(), "cancel must report true for a running job");

    let status = wait_for_completion(&manager).await;
    assert!(status.cancel_requested);
    assert!(
        status.done + status.failed < status.total,
        "cancellation should leave work undone: {status:?}"
    );
    assert!(status.finished_at.is_some());
}

#[tokio::test]
async fn cancel_is_noop_when_idle() {
    let server = MockServer::start().await;
    let manager = manager_for(test_config(&server.uri()));
    assert!(!manager.cancel());
}

#[tokio::test]
async fn in_flight_never_exceeds_configured_concurrency() {
    let server = MockServer::start().await;
    let all: Vec<String> = (0..6).map(|i| format!("p{i}")).collect();
    for handle in &all {
        mount_product(&server, handle, 80).await;
    }

    let manager = manager_for(test_config(&server.uri()));
    let opts = IngestOptions {
        concurrency: Some(2),
        ..IngestOptions::default()
    };
    let params = manager.start(all, opts).unwrap();
    assert_eq!(params.concurrency, 2);

    let mut max_in_flight = 0usize;
    loop {
        let status = manager.status().expect("job was started");
        max_in_flight = max_in_flight.max(status.in_flight.len());
        if status.is_complete() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    assert!(
        max_in_flight <= 2,
        "observed {max_in_flight} tasks in flight with concurrency 2"
    );

    let status = wait_for_completion(&manager).await;
    assert_eq!(status.done, 6);
}

#[tokio::test]
async fn start_full_catalog_ingests_listed_handles() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "products": [
                {"id": 1, "title": "A", "handle": "a"},
                {"id": 2, "title": "B", "handle": "b"}
            ]
        })))
        .mount(&server)
        .await;
    mount_product(&server, "a", 0).await;
    mount_product(&server, "b", 0).await;

    let manager = manager_for(test_config(&server.uri()));
    let params = manager
        .start_full_catalog(IngestOptions::default(), None)
        .await
        .unwrap();
    assert_eq!(params.total, 2);

    let status = wait_for_completion(&manager).await;
    assert_eq!(status.done, 2);
    assert_eq!(status.failed, 0);
}
