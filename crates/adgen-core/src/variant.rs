//! Copy variant types produced by the copy agent.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five fixed persuasive framings used to diversify copy generation.
///
/// Declaration order is the canonical tie-break order: when two variants
/// carry the same total score, the one with the earlier angle sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookAngle {
    ProblemAgitate,
    SocialProof,
    Scarcity,
    CuriosityGap,
    DreamOutcome,
}

impl HookAngle {
    /// All angles in canonical order.
    pub const ALL: [HookAngle; 5] = [
        HookAngle::ProblemAgitate,
        HookAngle::SocialProof,
        HookAngle::Scarcity,
        HookAngle::CuriosityGap,
        HookAngle::DreamOutcome,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HookAngle::ProblemAgitate => "problem_agitate",
            HookAngle::SocialProof => "social_proof",
            HookAngle::Scarcity => "scarcity",
            HookAngle::CuriosityGap => "curiosity_gap",
            HookAngle::DreamOutcome => "dream_outcome",
        }
    }

    /// Human-readable label used in prompts and the UI.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            HookAngle::ProblemAgitate => "Problem / Agitate",
            HookAngle::SocialProof => "Social Proof",
            HookAngle::Scarcity => "Scarcity",
            HookAngle::CuriosityGap => "Curiosity Gap",
            HookAngle::DreamOutcome => "Dream Outcome",
        }
    }
}

impl std::fmt::Display for HookAngle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-part persuasive-quality score plus the rounded aggregate.
///
/// All four values are in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantScores {
    pub emotional: u8,
    pub clarity: u8,
    pub persuasion: u8,
    pub total: u8,
}

/// One candidate ad produced by the copy agent. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyVariant {
    pub id: Uuid,
    pub angle: HookAngle,
    pub headline: String,
    pub subheadline: String,
    pub description: String,
    pub cta: String,
    pub scores: VariantScores,
    pub power_words: Vec<String>,
}
