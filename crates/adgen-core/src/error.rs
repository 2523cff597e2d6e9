//! Error taxonomy for the generation pipeline and configuration loading.

use thiserror::Error;

/// Failure taxonomy shared across the pipeline.
///
/// Only `Network` is ever retried. `ParseFailure` carries the raw
/// diagnostic for operator logs; [`GenerationError::user_message`] is what
/// reaches end users.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("invalid brief: {0}")]
    Validation(String),

    #[error("network failure calling completion backend: {0}")]
    Network(String),

    #[error("completion backend quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("malformed completion response: {0}")]
    ParseFailure(String),

    #[error("deadline exceeded")]
    Timeout,

    #[error("cancelled")]
    Cancelled,
}

impl GenerationError {
    /// Stable snake_case code used in API error bodies and job records.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::Validation(_) => "validation_error",
            GenerationError::Network(_) => "network_error",
            GenerationError::QuotaExceeded(_) => "quota_exceeded",
            GenerationError::ParseFailure(_) => "parse_failure",
            GenerationError::Timeout => "timeout",
            GenerationError::Cancelled => "cancelled",
        }
    }

    /// Short generic message safe to surface to end users. Raw provider
    /// text is never forwarded verbatim.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationError::Validation(_) => "the brief is missing required information",
            GenerationError::Network(_) => "the generation service is temporarily unavailable",
            GenerationError::QuotaExceeded(_) => {
                "generation quota reached; try again later or upgrade your plan"
            }
            GenerationError::ParseFailure(_) => "generation produced an unusable result",
            GenerationError::Timeout => "generation took too long and was stopped",
            GenerationError::Cancelled => "generation was cancelled",
        }
    }
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(GenerationError::Timeout.code(), "timeout");
        assert_eq!(
            GenerationError::QuotaExceeded("monthly cap".to_string()).code(),
            "quota_exceeded"
        );
        assert_eq!(
            GenerationError::Validation("x".to_string()).code(),
            "validation_error"
        );
    }

    #[test]
    fn user_message_never_echoes_raw_diagnostic() {
        let err = GenerationError::ParseFailure("expected field `headline` at line 3".to_string());
        assert!(!err.user_message().contains("headline"));
    }
}
