//! Psychology agent: audience modelling with a total fallback.
//!
//! The model path asks the completion backend for a strict-JSON profile;
//! any network, quota, or parse failure falls back to a deterministic
//! heuristic profile derived from the brief itself. Both paths produce the
//! complete schema — callers never null-check — and carry their provenance
//! as a tagged [`ProfileSource`].

mod agent;
mod heuristics;
mod prompt;
mod types;

pub use agent::{analyze, HEURISTIC_CONFIDENCE, MODEL_CONFIDENCE};
pub use heuristics::heuristic_profile;
pub use prompt::build_prompt;
pub use types::{
    EmotionalArc, EmotionalProfile, OceanVector, ProfileOutcome, ProfileSource,
    PsychologyProfile, RankedFactor, COGNITIVE_BIASES, PERSUASION_PRINCIPLES,
};
