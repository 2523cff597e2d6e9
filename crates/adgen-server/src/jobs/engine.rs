//! The engine that drives one generation job end to end.

use std::sync::Arc;

use adgen_completion::{CompletionClient, CompletionContext, PollObserver, PollPolicy};
use adgen_core::{Brief, CancelToken, GenerationError};
use adgen_perf::{PerformanceInput, VisualFlags};
use uuid::Uuid;

use super::{GenerationOutput, JobPhase, JobRegistry, JobStatus, RankedCreative};

const PROGRESS_ANALYZING: u8 = 10;
const PROGRESS_GENERATING: u8 = 40;
const PROGRESS_POLLING: u8 = 60;
const PROGRESS_POLLING_CAP: u8 = 95;

/// Owns the job registry and the completion client, and runs jobs
/// against them. Cheap to clone; clones share the registry.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    registry: Arc<JobRegistry>,
    client: Arc<CompletionClient>,
    model: Arc<str>,
    policy: PollPolicy,
}

impl Orchestrator {
    #[must_use]
    pub fn new(client: CompletionClient, model: &str, policy: PollPolicy) -> Self {
        Self {
            registry: Arc::new(JobRegistry::new()),
            client: Arc::new(client),
            model: Arc::from(model),
            policy,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Queues a job and runs it on a background task.
    #[must_use]
    pub fn submit(&self, brief: Brief) -> Uuid {
        let (job_id, cancel) = self.registry.create();
        let engine = self.clone();
        tokio::spawn(async move {
            engine.execute(job_id, brief, cancel).await;
        });
        job_id
    }

    /// Queues a job and runs it to its terminal state before returning
    /// the final snapshot.
    pub async fn submit_and_wait(&self, brief: Brief) -> JobStatus {
        let (job_id, cancel) = self.registry.create();
        self.execute(job_id, brief, cancel).await;
        // The entry cannot have been removed; fall back to a fresh error
        // snapshot only to satisfy the type.
        self.registry.snapshot(job_id).unwrap_or(JobStatus {
            job_id,
            phase: JobPhase::Error,
            progress: 0,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
            error: None,
            output: None,
        })
    }

    async fn execute(&self, job_id: Uuid, brief: Brief, cancel: CancelToken) {
        tracing::info!(%job_id, product = %brief.product_name, "generation job started");

        self.registry
            .advance(job_id, JobPhase::Analyzing, PROGRESS_ANALYZING);
        let ctx = CompletionContext::new(cancel.clone(), self.policy.clone());
        let psychology = adgen_psych::analyze(&self.client, &self.model, &brief, &ctx).await;

        if self.check_cancelled(job_id, &cancel) {
            return;
        }

        self.registry
            .advance(job_id, JobPhase::Generating, PROGRESS_GENERATING);
        let copy_ctx = ctx.with_observer(self.poll_observer(job_id));
        let variants =
            match adgen_copy::generate_variants(&self.client, &self.model, &brief, &copy_ctx).await
            {
                Ok(variants) => variants,
                Err(err) => {
                    let err = GenerationError::from(err);
                    tracing::warn!(%job_id, error = %err, "generation job failed");
                    self.registry.fail(job_id, &err);
                    return;
                }
            };

        if self.check_cancelled(job_id, &cancel) {
            return;
        }

        let visual = VisualFlags {
            has_image: brief.image_ref.is_some(),
            ..VisualFlags::default()
        };
        let creatives: Vec<RankedCreative> = variants
            .into_iter()
            .map(|variant| {
                let performance = adgen_perf::predict(&PerformanceInput {
                    headline: variant.headline.clone(),
                    description: variant.description.clone(),
                    cta: variant.cta.clone(),
                    industry: brief.industry.clone(),
                    tone: brief.tone,
                    visual,
                });
                RankedCreative {
                    variant,
                    performance,
                }
            })
            .collect();

        // generate_variants never returns an empty list on success.
        let quality_score = creatives
            .first()
            .map_or(0, |top| top.variant.scores.total);

        tracing::info!(
            %job_id,
            creatives = creatives.len(),
            quality_score,
            "generation job complete"
        );
        self.registry.complete(
            job_id,
            GenerationOutput {
                brief,
                psychology,
                creatives,
                quality_score,
            },
        );
    }

    /// Records the cancellation if the token has been flipped. Returns
    /// whether the job should stop.
    fn check_cancelled(&self, job_id: Uuid, cancel: &CancelToken) -> bool {
        if cancel.is_cancelled() {
            tracing::info!(%job_id, "generation job cancelled");
            self.registry.fail(job_id, &GenerationError::Cancelled);
            return true;
        }
        false
    }

    /// Observer handed to the completion client: flips the job into the
    /// `polling` phase and inches progress forward per attempt.
    fn poll_observer(&self, job_id: Uuid) -> PollObserver {
        let registry = Arc::clone(&self.registry);
        Arc::new(move |attempt| {
            #[allow(clippy::cast_possible_truncation)]
            let step = (attempt.min(7) * 5) as u8;
            registry.advance(
                job_id,
                JobPhase::Polling,
                (PROGRESS_POLLING + step).min(PROGRESS_POLLING_CAP),
            );
        })
    }
}
