//! Poll loop for asynchronous backend completion jobs.
//!
//! Delay schedule: `base + step × attempt`, capped, plus uniform jitter so
//! concurrent jobs do not poll in lock-step. The cancellation token and the
//! hard deadline are checked before every attempt and every sleep; transient
//! poll errors are tolerated until the deadline, hard errors abort at once.

use std::time::{Duration, Instant};

use crate::client::CompletionClient;
use crate::error::CompletionError;
use crate::retry::is_retriable;
use crate::types::{CompletionContext, JobPoll, PollPolicy};

pub(crate) async fn poll_job(
    client: &CompletionClient,
    job_id: &str,
    ctx: &CompletionContext,
) -> Result<String, CompletionError> {
    let started = Instant::now();
    let mut attempt: u32 = 0;

    loop {
        if ctx.cancel.is_cancelled() {
            return Err(CompletionError::Cancelled);
        }
        let elapsed = started.elapsed();
        if elapsed >= ctx.policy.deadline {
            return Err(CompletionError::Timeout(attempt));
        }
        if let Some(on_poll) = &ctx.on_poll {
            on_poll(attempt);
        }

        match client.fetch_job(job_id).await {
            Ok(JobPoll::Done(text)) => return Ok(text),
            Ok(JobPoll::Pending) => {}
            Err(err) if is_retriable(&err) => {
                tracing::warn!(
                    job_id,
                    attempt,
                    error = %err,
                    "transient error polling backend job; will retry until deadline"
                );
            }
            Err(err) => return Err(err),
        }

        attempt += 1;
        let remaining = ctx.policy.deadline.saturating_sub(started.elapsed());
        let delay = delay_for_attempt(&ctx.policy, attempt).min(remaining);
        tokio::time::sleep(delay).await;
    }
}

/// Computes the jittered delay before poll attempt `attempt` (1-based).
fn delay_for_attempt(policy: &PollPolicy, attempt: u32) -> Duration {
    let stepped = policy
        .base_delay_ms
        .saturating_add(policy.delay_step_ms.saturating_mul(u64::from(attempt - 1)));
    let capped = stepped.min(policy.max_delay_ms);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let jitter = (rand::random::<f64>() * policy.jitter_ms as f64) as u64;
    Duration::from_millis(capped + jitter)
}
