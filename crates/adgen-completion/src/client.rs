//! Completion backend client.
//!
//! Wraps `reqwest` with quota detection, typed deserialize errors, retry on
//! transient failures, and the poll loop for asynchronous backend jobs. Use
//! [`CompletionClient::from_config`] in production or
//! [`CompletionClient::with_base_url`] to point at a mock server in tests.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::CompletionError;
use crate::poll::poll_job;
use crate::retry::retry_with_backoff;
use crate::types::{
    CompletionContext, CompletionEnvelope, CompletionOutcome, CompletionRequest, JobPoll,
};
use adgen_core::AppConfig;

pub struct CompletionClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .finish_non_exhaustive()
    }
}

impl CompletionClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CompletionError::Backend`] if the base
    /// URL is unparseable.
    pub fn from_config(config: &AppConfig) -> Result<Self, CompletionError> {
        Self::build(
            &config.completion_base_url,
            config.completion_api_key.clone(),
            config.completion_timeout_secs,
            config.completion_max_retries,
            config.completion_backoff_base_ms,
        )
    }

    /// Test constructor: custom base URL, no API key, no retry back-off
    /// delay (retries still happen, just without sleeping).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CompletionClient::from_config`].
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, CompletionError> {
        Self::build(base_url, None, timeout_secs, 2, 0)
    }

    fn build(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("adgen/0.1 (creative-generation)")
            .build()?;

        // Normalise: exactly one trailing slash so join() appends rather
        // than replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| CompletionError::Backend(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Runs one completion to completion: retries the initial request on
    /// transient errors, and when the backend answers with a queued job,
    /// polls it under the context's policy until text, deadline, or
    /// cancellation.
    ///
    /// # Errors
    ///
    /// - [`CompletionError::Cancelled`] if the context token is tripped.
    /// - [`CompletionError::QuotaExceeded`] on a 429; never retried.
    /// - [`CompletionError::Deserialize`] on a malformed envelope; never retried.
    /// - [`CompletionError::Timeout`] when the poll deadline elapses.
    /// - [`CompletionError::Http`] when transient retries are exhausted.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
        ctx: &CompletionContext,
    ) -> Result<String, CompletionError> {
        if ctx.cancel.is_cancelled() {
            return Err(CompletionError::Cancelled);
        }

        let outcome = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.post_completion(request)
        })
        .await?;

        match outcome {
            CompletionOutcome::Ready(text) => Ok(text),
            CompletionOutcome::Pending(job_id) => {
                tracing::debug!(job_id = %job_id, "backend queued completion; entering poll loop");
                poll_job(self, &job_id, ctx).await
            }
        }
    }

    /// Sends the initial completion request.
    async fn post_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionOutcome, CompletionError> {
        let url = self.endpoint("v1/completions")?;
        let mut req = self.client.post(url.clone()).json(request);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let envelope = Self::read_envelope(response, &url).await?;

        match envelope.status.as_str() {
            "ok" => envelope
                .text
                .ok_or_else(|| CompletionError::Backend("ok response missing text".to_string()))
                .map(CompletionOutcome::Ready),
            "pending" => envelope
                .job_id
                .ok_or_else(|| {
                    CompletionError::Backend("pending response missing job_id".to_string())
                })
                .map(CompletionOutcome::Pending),
            other => Err(CompletionError::Backend(format!(
                "unexpected completion status '{other}': {}",
                envelope.error.unwrap_or_default()
            ))),
        }
    }

    /// Polls one asynchronous backend job once.
    pub(crate) async fn fetch_job(&self, job_id: &str) -> Result<JobPoll, CompletionError> {
        let url = self.endpoint(&format!("v1/completions/jobs/{job_id}"))?;
        let mut req = self.client.get(url.clone());
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let envelope = Self::read_envelope(response, &url).await?;

        match envelope.status.as_str() {
            "succeeded" => envelope
                .text
                .ok_or_else(|| {
                    CompletionError::Backend("succeeded job missing text".to_string())
                })
                .map(JobPoll::Done),
            "pending" | "running" => Ok(JobPoll::Pending),
            "failed" => Err(CompletionError::Backend(
                envelope
                    .error
                    .unwrap_or_else(|| "backend job failed without detail".to_string()),
            )),
            other => Err(CompletionError::Backend(format!(
                "unexpected job status '{other}'"
            ))),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, CompletionError> {
        self.base_url
            .join(path)
            .map_err(|e| CompletionError::Backend(format!("invalid endpoint path '{path}': {e}")))
    }

    /// Asserts quota/HTTP status and parses the JSON envelope.
    async fn read_envelope(
        response: reqwest::Response,
        url: &Url,
    ) -> Result<CompletionEnvelope, CompletionError> {
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let detail = response.text().await.unwrap_or_default();
            return Err(CompletionError::QuotaExceeded(if detail.is_empty() {
                "rate limited by completion backend".to_string()
            } else {
                detail
            }));
        }

        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CompletionError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_single_trailing_slash() {
        let client =
            CompletionClient::with_base_url("http://localhost:9999", 5).expect("client builds");
        assert_eq!(client.base_url.as_str(), "http://localhost:9999/");
    }

    #[test]
    fn endpoint_joins_relative_paths() {
        let client =
            CompletionClient::with_base_url("http://localhost:9999/api/", 5).expect("client builds");
        let url = client.endpoint("v1/completions").expect("join");
        assert_eq!(url.as_str(), "http://localhost:9999/api/v1/completions");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = CompletionClient::with_base_url("not a url", 5);
        assert!(matches!(result, Err(CompletionError::Backend(_))));
    }
}
