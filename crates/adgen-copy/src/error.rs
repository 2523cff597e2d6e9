use adgen_completion::CompletionError;
use adgen_core::GenerationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CopyError {
    /// Every hook angle failed. Carries the first failure as the
    /// representative cause.
    #[error("all {attempted} copy angles failed")]
    AllAnglesFailed {
        attempted: usize,
        #[source]
        first: CompletionError,
    },
}

impl From<CopyError> for GenerationError {
    fn from(err: CopyError) -> Self {
        match err {
            CopyError::AllAnglesFailed { first, .. } => first.into(),
        }
    }
}
