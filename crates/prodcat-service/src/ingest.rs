//! Bulk ingestion controller: bounded worker pool, per-task timeout, linear
//! retry backoff, cooperative cancellation.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};

use prodcat_core::job::ERROR_LOG_CAPACITY;
use prodcat_core::{IngestFailure, JobParams, JobStatus};

use crate::error::ServiceError;
use crate::service::CatalogService;

/// Overrides for one bulk job; unset fields fall back to the configured
/// ingest defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    pub concurrency: Option<usize>,
    pub task_timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub pacing_delay_ms: Option<u64>,
}

/// Owns at most one bulk ingestion job at a time.
///
/// Starting a job while one runs is rejected, never queued. The previous
/// job's final status stays observable until the next job starts.
pub struct JobManager {
    service: Arc<CatalogService>,
    active: Mutex<Option<Arc<JobState>>>,
}

struct JobState {
    params: JobParams,
    started_at: DateTime<Utc>,
    cancel: AtomicBool,
    inner: Mutex<JobInner>,
}

struct JobInner {
    queue: VecDeque<String>,
    in_flight: Vec<String>,
    done: usize,
    failed: usize,
    running: bool,
    workers_alive: usize,
    finished_at: Option<DateTime<Utc>>,
    recent_errors: VecDeque<IngestFailure>,
}

impl JobManager {
    #[must_use]
    pub fn new(service: Arc<CatalogService>) -> Self {
        Self {
            service,
            active: Mutex::new(None),
        }
    }

    /// Starts a bulk job over `handles`, deduplicated preserving first
    /// occurrence. Returns the effective parameters immediately; the work
    /// proceeds on background tasks.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::EmptyJob`] when no handles remain after dedup.
    /// - [`ServiceError::JobAlreadyRunning`] while a job is in progress.
    pub fn start(
        &self,
        handles: Vec<String>,
        opts: IngestOptions,
    ) -> Result<JobParams, ServiceError> {
        let mut seen = HashSet::new();
        let deduped: VecDeque<String> = handles
            .into_iter()
            .filter(|h| seen.insert(h.clone()))
            .collect();

        if deduped.is_empty() {
            return Err(ServiceError::EmptyJob);
        }

        let config = &self.service.config;
        let total = deduped.len();
        let params = JobParams {
            total,
            concurrency: opts
                .concurrency
                .unwrap_or(config.ingest_concurrency)
                .clamp(1, total),
            task_timeout_secs: opts
                .task_timeout_secs
                .unwrap_or(config.ingest_task_timeout_secs),
            max_retries: opts.max_retries.unwrap_or(config.ingest_max_retries),
            pacing_delay_ms: opts
                .pacing_delay_ms
                .unwrap_or(config.ingest_pacing_delay_ms),
        };

        let state = {
            let mut active = self.active.lock().expect("job manager lock poisoned");
            if let Some(state) = active.as_ref() {
                if state.inner.lock().expect("job lock poisoned").running {
                    return Err(ServiceError::JobAlreadyRunning);
                }
            }

            let state = Arc::new(JobState {
                params,
                started_at: Utc::now(),
                cancel: AtomicBool::new(false),
                inner: Mutex::new(JobInner {
                    queue: deduped,
                    in_flight: Vec::new(),
                    done: 0,
                    failed: 0,
                    running: true,
                    workers_alive: params.concurrency,
                    finished_at: None,
                    recent_errors: VecDeque::new(),
                }),
            });
            *active = Some(Arc::clone(&state));
            state
        };

        tracing::info!(
            total,
            concurrency = params.concurrency,
            task_timeout_secs = params.task_timeout_secs,
            max_retries = params.max_retries,
            "starting bulk ingestion job"
        );

        for worker in 0..params.concurrency {
            let state = Arc::clone(&state);
            let service = Arc::clone(&self.service);
            tokio::spawn(async move {
                run_worker(worker, &service, &state).await;
            });
        }

        Ok(params)
    }

    /// Lists the full catalog (optionally capped at `max` handles) and
    /// starts a job over it.
    ///
    /// # Errors
    ///
    /// Propagates catalog listing errors, plus everything [`Self::start`]
    /// returns.
    pub async fn start_full_catalog(
        &self,
        opts: IngestOptions,
        max: Option<usize>,
    ) -> Result<JobParams, ServiceError> {
        let config = &self.service.config;
        let handles = self
            .service
            .client
            .fetch_all_handles(
                &config.store_url,
                config.catalog_page_limit,
                config.inter_page_delay_ms,
                max,
            )
            .await?;
        self.start(handles, opts)
    }

    /// Point-in-time snapshot of the current (or most recent) job.
    #[must_use]
    pub fn status(&self) -> Option<JobStatus> {
        let active = self.active.lock().expect("job manager lock poisoned");
        active.as_ref().map(|state| state.snapshot())
    }

    /// Requests cooperative cancellation: in-flight tasks finish, nothing
    /// new dispatches. Returns `false` when no job is running.
    pub fn cancel(&self) -> bool {
        let active = self.active.lock().expect("job manager lock poisoned");
        match active.as_ref() {
            Some(state) if state.inner.lock().expect("job lock poisoned").running => {
                state.cancel.store(true, Ordering::SeqCst);
                tracing::info!("bulk ingestion cancellation requested");
                true
            }
            _ => false,
        }
    }
}

impl JobState {
    fn snapshot(&self) -> JobStatus {
        let inner = self.inner.lock().expect("job lock poisoned");
        JobStatus {
            running: inner.running,
            cancel_requested: self.cancel.load(Ordering::SeqCst),
            total: self.params.total,
            done: inner.done,
            failed: inner.failed,
            in_flight: inner.in_flight.clone(),
            queued: inner.queue.len(),
            started_at: self.started_at,
            finished_at: inner.finished_at,
            recent_errors: inner.recent_errors.iter().cloned().collect(),
        }
    }
}

/// Worker loop: check cancellation, pop the next handle (FIFO), run the
/// ingest task, record the outcome, pace, repeat. The last worker to exit
/// finalizes the job.
async fn run_worker(worker: usize, service: &CatalogService, state: &JobState) {
    loop {
        if state.cancel.load(Ordering::SeqCst) {
            tracing::debug!(worker, "worker stopping on cancellation");
            break;
        }

        let handle = {
            let mut inner = state.inner.lock().expect("job lock poisoned");
            match inner.queue.pop_front() {
                Some(h) => {
                    inner.in_flight.push(h.clone());
                    h
                }
                None => break,
            }
        };

        let result = run_task(service, &handle, state.params).await;

        {
            let mut inner = state.inner.lock().expect("job lock poisoned");
            inner.in_flight.retain(|h| h != &handle);
            match result {
                Ok(()) => inner.done += 1,
                Err(e) => {
                    inner.failed += 1;
                    tracing::warn!(worker, handle = %handle, error = %e, "ingest task failed");
                    if inner.recent_errors.len() >= ERROR_LOG_CAPACITY {
                        inner.recent_errors.pop_front();
                    }
                    inner.recent_errors.push_back(IngestFailure {
                        handle: handle.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if state.params.pacing_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(state.params.pacing_delay_ms)).await;
        }
    }

    let mut inner = state.inner.lock().expect("job lock poisoned");
    inner.workers_alive -= 1;
    if inner.workers_alive == 0 {
        inner.running = false;
        let finished = Utc::now();
        inner.finished_at = Some(finished);
        tracing::info!(
            total = state.params.total,
            done = inner.done,
            failed = inner.failed,
            cancelled = state.cancel.load(Ordering::SeqCst),
            elapsed_secs = (finished - state.started_at).num_seconds(),
            "bulk ingestion job finished"
        );
    }
}

/// One ingest task: `refresh_product` under a timeout, retried up to
/// `max_retries` additional times with linearly increasing backoff
/// (`backoff_ms * attempt`). A handle resolving to no product is a failure.
async fn run_task(
    service: &CatalogService,
    handle: &str,
    params: JobParams,
) -> Result<(), ServiceError> {
    let timeout = Duration::from_secs(params.task_timeout_secs);
    let backoff_ms = service.config.ingest_retry_backoff_ms;
    let mut attempt = 0u32;

    loop {
        let outcome = match tokio::time::timeout(timeout, service.refresh_product(handle)).await {
            Err(_) => Err(ServiceError::TaskTimeout {
                handle: handle.to_owned(),
                timeout_secs: params.task_timeout_secs,
            }),
            Ok(Ok(Some(_))) => Ok(()),
            Ok(Ok(None)) => Err(ServiceError::ProductNotFound {
                handle: handle.to_owned(),
            }),
            Ok(Err(e)) => Err(e),
        };

        match outcome {
            Ok(()) => return Ok(()),
            Err(e) if attempt < params.max_retries => {
                attempt += 1;
                let wait = backoff_ms * u64::from(attempt);
                tracing::debug!(
                    handle,
                    attempt,
                    max_retries = params.max_retries,
                    wait_ms = wait,
                    error = %e,
                    "retrying ingest task"
                );
                tokio::time::sleep(Duration::from_millis(wait)).await;
            }
            Err(e) => return Err(e),
        }
    }
}
