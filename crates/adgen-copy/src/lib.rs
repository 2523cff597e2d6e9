//! Copy agent: turns a normalized brief into scored ad-copy variants.
//!
//! One completion call per hook angle, fanned out in parallel; a failed
//! angle is logged and dropped rather than failing the batch — the agent
//! only errors when every angle fails. Scoring is a pure function of each
//! variant's own text, so results are stable under partial failure.

mod agent;
mod error;
mod prompt;
mod scorer;

pub use agent::generate_variants;
pub use error::CopyError;
pub use prompt::build_prompt;
pub use scorer::{score, VariantText};
