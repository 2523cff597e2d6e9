use adgen_core::GenerationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("deserialize error in {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("backend reported a malformed or refused completion: {0}")]
    Backend(String),

    #[error("poll deadline exceeded after {0} attempts")]
    Timeout(u32),

    #[error("cancelled")]
    Cancelled,
}

/// Maps client-level failures into the pipeline taxonomy. The raw
/// diagnostic stays inside the variant payload for operator logs; user
/// messaging is derived from the taxonomy, never from this text.
impl From<CompletionError> for GenerationError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Http(e) => GenerationError::Network(e.to_string()),
            CompletionError::QuotaExceeded(msg) => GenerationError::QuotaExceeded(msg),
            CompletionError::Deserialize { context, source } => {
                GenerationError::ParseFailure(format!("{context}: {source}"))
            }
            CompletionError::Backend(msg) => GenerationError::ParseFailure(msg),
            CompletionError::Timeout(_) => GenerationError::Timeout,
            CompletionError::Cancelled => GenerationError::Cancelled,
        }
    }
}
