//! Bulk ingestion job status types.
//!
//! These are point-in-time snapshots produced by the job manager in
//! `prodcat-service`; they carry no behavior and serialize cleanly for
//! operator-facing output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Most recent failures retained in a job's error log.
pub const ERROR_LOG_CAPACITY: usize = 20;

/// One failed handle in a bulk job's bounded error log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestFailure {
    pub handle: String,
    pub error: String,
}

/// Effective parameters reported when a bulk job starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobParams {
    pub total: usize,
    pub concurrency: usize,
    pub task_timeout_secs: u64,
    pub max_retries: u32,
    pub pacing_delay_ms: u64,
}

/// Point-in-time snapshot of a bulk ingestion job.
///
/// Invariant at completion: `done + failed == total` when the job ran to
/// exhaustion, `done + failed <= total` when cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatus {
    pub running: bool,
    pub cancel_requested: bool,
    pub total: usize,
    pub done: usize,
    pub failed: usize,
    /// Handles currently being processed.
    pub in_flight: Vec<String>,
    /// Handles still waiting for dispatch.
    pub queued: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Most recent failures, oldest first, capped at [`ERROR_LOG_CAPACITY`].
    pub recent_errors: Vec<IngestFailure>,
}

impl JobStatus {
    /// True once the queue is drained (or cancelled) and no task is in flight.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.running
    }
}
