//! Generation jobs: the registry that tracks them and the engine that
//! runs them.
//!
//! A job moves `queued → analyzing → generating → (polling) → complete`,
//! or ends in `error` or `cancelled`. Progress only ever increases, and a
//! terminal phase is sticky: nothing written after it changes the record.

mod engine;
mod registry;

pub use engine::Orchestrator;
pub use registry::JobRegistry;

use adgen_core::{Brief, CopyVariant, GenerationError};
use adgen_perf::PerformanceReport;
use adgen_psych::ProfileOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Lifecycle phase of a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPhase {
    Queued,
    Analyzing,
    Generating,
    /// The completion backend queued at least one asynchronous job that
    /// is being polled.
    Polling,
    Complete,
    Error,
    Cancelled,
}

impl JobPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobPhase::Complete | JobPhase::Error | JobPhase::Cancelled
        )
    }
}

/// Error surface of a failed job: stable code plus a user-safe message.
#[derive(Debug, Clone, Serialize)]
pub struct JobError {
    pub code: &'static str,
    pub message: &'static str,
}

impl From<&GenerationError> for JobError {
    fn from(err: &GenerationError) -> Self {
        Self {
            code: err.code(),
            message: err.user_message(),
        }
    }
}

/// One variant paired with its deterministic performance report.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCreative {
    pub variant: CopyVariant,
    pub performance: PerformanceReport,
}

/// Everything a completed job produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutput {
    pub brief: Brief,
    pub psychology: ProfileOutcome,
    /// Ranked best-first; never empty on a complete job.
    pub creatives: Vec<RankedCreative>,
    /// Text score of the top-ranked variant, 0-100.
    pub quality_score: u8,
}

/// Point-in-time snapshot of a job, as returned by the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct JobStatus {
    pub job_id: Uuid,
    pub phase: JobPhase,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JobError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<GenerationOutput>,
}
