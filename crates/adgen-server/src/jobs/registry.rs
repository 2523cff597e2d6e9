//! In-memory job store.
//!
//! All mutation goes through methods that enforce two invariants: progress
//! is monotone, and terminal phases are sticky. Readers get owned
//! snapshots, never references into the map.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use adgen_core::{CancelToken, GenerationError};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{GenerationOutput, JobError, JobPhase, JobStatus};

#[derive(Debug, Clone)]
struct JobEntry {
    phase: JobPhase,
    progress: u8,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    error: Option<JobError>,
    output: Option<GenerationOutput>,
    cancel: CancelToken,
}

#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: RwLock<HashMap<Uuid, JobEntry>>,
}

impl JobRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queued job and returns its id with the cancel token the
    /// engine should thread through completion calls.
    pub fn create(&self) -> (Uuid, CancelToken) {
        let id = Uuid::new_v4();
        let cancel = CancelToken::new();
        let now = Utc::now();
        self.write().insert(
            id,
            JobEntry {
                phase: JobPhase::Queued,
                progress: 0,
                created_at: now,
                updated_at: now,
                error: None,
                output: None,
                cancel: cancel.clone(),
            },
        );
        (id, cancel)
    }

    /// Owned snapshot of one job, or `None` for an unknown id.
    #[must_use]
    pub fn snapshot(&self, id: Uuid) -> Option<JobStatus> {
        self.read().get(&id).map(|entry| JobStatus {
            job_id: id,
            phase: entry.phase,
            progress: entry.progress,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
            error: entry.error.clone(),
            output: entry.output.clone(),
        })
    }

    /// The job's cancel token, or `None` for an unknown id.
    #[must_use]
    pub fn cancel_token(&self, id: Uuid) -> Option<CancelToken> {
        self.read().get(&id).map(|entry| entry.cancel.clone())
    }

    /// Moves a live job to `phase` with at least `progress`. No-op on
    /// terminal jobs; progress never moves backwards.
    pub fn advance(&self, id: Uuid, phase: JobPhase, progress: u8) {
        if let Some(entry) = self.write().get_mut(&id) {
            if entry.phase.is_terminal() {
                return;
            }
            entry.phase = phase;
            entry.progress = entry.progress.max(progress);
            entry.updated_at = Utc::now();
        }
    }

    /// Marks a live job complete with its output.
    pub fn complete(&self, id: Uuid, output: GenerationOutput) {
        if let Some(entry) = self.write().get_mut(&id) {
            if entry.phase.is_terminal() {
                return;
            }
            entry.phase = JobPhase::Complete;
            entry.progress = 100;
            entry.output = Some(output);
            entry.updated_at = Utc::now();
        }
    }

    /// Marks a live job failed. `Cancelled` gets its own terminal phase;
    /// everything else lands in `error`. Progress freezes where it was.
    pub fn fail(&self, id: Uuid, error: &GenerationError) {
        if let Some(entry) = self.write().get_mut(&id) {
            if entry.phase.is_terminal() {
                return;
            }
            entry.phase = match error {
                GenerationError::Cancelled => JobPhase::Cancelled,
                _ => JobPhase::Error,
            };
            entry.error = Some(JobError::from(error));
            entry.updated_at = Utc::now();
        }
    }

    /// Requests cancellation. Returns `false` for an unknown id. The job
    /// record itself is updated by the engine at its next check-in, not
    /// here, so progress stays consistent with the work actually done.
    pub fn cancel(&self, id: Uuid) -> bool {
        match self.read().get(&id) {
            Some(entry) => {
                if !entry.phase.is_terminal() {
                    entry.cancel.cancel();
                }
                true
            }
            None => false,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Uuid, JobEntry>> {
        match self.jobs.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, JobEntry>> {
        match self.jobs.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
