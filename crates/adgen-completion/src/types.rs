//! Request/response shapes and per-call context for the completion client.

use std::sync::Arc;
use std::time::Duration;

use adgen_core::{AppConfig, CancelToken};
use serde::{Deserialize, Serialize};

/// Parameters for one completion call.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Instructs the backend to emit strict JSON with no surrounding prose.
    pub json_only: bool,
}

impl CompletionRequest {
    #[must_use]
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: 0.7,
            max_tokens: 800,
            json_only: false,
        }
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn json_only(mut self) -> Self {
        self.json_only = true;
        self
    }
}

/// Backoff schedule and hard deadline for polling an asynchronous backend job.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub base_delay_ms: u64,
    pub delay_step_ms: u64,
    pub max_delay_ms: u64,
    pub jitter_ms: u64,
    pub deadline: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            base_delay_ms: 2_000,
            delay_step_ms: 500,
            max_delay_ms: 6_000,
            jitter_ms: 400,
            deadline: Duration::from_secs(120),
        }
    }
}

impl PollPolicy {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_delay_ms: config.poll_base_delay_ms,
            delay_step_ms: config.poll_delay_step_ms,
            max_delay_ms: config.poll_max_delay_ms,
            jitter_ms: config.poll_jitter_ms,
            deadline: Duration::from_secs(config.job_deadline_secs),
        }
    }
}

/// Called with the attempt number each time the poll loop runs another
/// attempt, so the orchestrator can surface the `polling` job state.
pub type PollObserver = Arc<dyn Fn(u32) + Send + Sync>;

/// Cancellation, backoff policy, and poll observer for one completion call.
#[derive(Clone, Default)]
pub struct CompletionContext {
    pub cancel: CancelToken,
    pub policy: PollPolicy,
    pub on_poll: Option<PollObserver>,
}

impl CompletionContext {
    #[must_use]
    pub fn new(cancel: CancelToken, policy: PollPolicy) -> Self {
        Self {
            cancel,
            policy,
            on_poll: None,
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: PollObserver) -> Self {
        self.on_poll = Some(observer);
        self
    }
}

impl std::fmt::Debug for CompletionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionContext")
            .field("cancel", &self.cancel)
            .field("policy", &self.policy)
            .field("on_poll", &self.on_poll.as_ref().map(|_| "<observer>"))
            .finish()
    }
}

/// Envelope returned by `POST /v1/completions` and the job-status endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct CompletionEnvelope {
    pub status: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of the initial completion request.
#[derive(Debug)]
pub(crate) enum CompletionOutcome {
    /// The backend answered synchronously.
    Ready(String),
    /// The backend queued an asynchronous job to poll.
    Pending(String),
}

/// One poll of an asynchronous backend job.
#[derive(Debug)]
pub(crate) enum JobPoll {
    Done(String),
    Pending,
}
