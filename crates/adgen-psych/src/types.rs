//! Audience-psychology profile schema.

use serde::{Deserialize, Serialize};

/// The six persuasion principles, in canonical order.
pub const PERSUASION_PRINCIPLES: [&str; 6] = [
    "reciprocity",
    "commitment",
    "social_proof",
    "authority",
    "liking",
    "scarcity",
];

/// The ten cognitive biases scored per audience, in canonical order.
pub const COGNITIVE_BIASES: [&str; 10] = [
    "anchoring",
    "loss_aversion",
    "framing",
    "bandwagon",
    "decoy_effect",
    "endowment",
    "recency",
    "mere_exposure",
    "halo_effect",
    "zero_risk",
];

/// Five-trait personality vector; each dimension in `[0, 1]`.
///
/// An audience heuristic, not clinical psychometrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OceanVector {
    pub openness: f32,
    pub conscientiousness: f32,
    pub extraversion: f32,
    pub agreeableness: f32,
    pub neuroticism: f32,
}

impl OceanVector {
    pub(crate) fn clamp_unit(&mut self) {
        for v in [
            &mut self.openness,
            &mut self.conscientiousness,
            &mut self.extraversion,
            &mut self.agreeableness,
            &mut self.neuroticism,
        ] {
            *v = v.clamp(0.0, 1.0);
        }
    }
}

/// One principle or bias with its effectiveness score and how to apply it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedFactor {
    pub name: String,
    /// Effectiveness for this audience, 0–100.
    pub effectiveness: u8,
    pub application: String,
}

/// Narrative arc the ad copy should follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalArc {
    ProblemSolution,
    Aspiration,
    FearRelief,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionalProfile {
    pub primary_emotions: Vec<String>,
    pub arc: EmotionalArc,
    pub triggers: Vec<String>,
    pub avoidances: Vec<String>,
}

/// Full audience model. Produced once per job; read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsychologyProfile {
    pub ocean: OceanVector,
    /// All six principles, sorted by effectiveness descending.
    pub principles: Vec<RankedFactor>,
    /// All ten biases, sorted by effectiveness descending.
    pub biases: Vec<RankedFactor>,
    pub emotional: EmotionalProfile,
    pub recommendations: Vec<String>,
    /// Confidence in this profile, `[0, 1]`.
    pub confidence: f32,
}

impl PsychologyProfile {
    /// The highest-ranked persuasion principle.
    #[must_use]
    pub fn primary_principle(&self) -> &str {
        self.principles
            .first()
            .map_or("social_proof", |f| f.name.as_str())
    }

    /// Clamps scores into range and sorts both factor lists descending.
    /// Sorting is stable, so equal scores keep canonical order.
    pub(crate) fn normalize(&mut self) {
        self.ocean.clamp_unit();
        self.confidence = self.confidence.clamp(0.0, 1.0);
        for factor in self.principles.iter_mut().chain(self.biases.iter_mut()) {
            factor.effectiveness = factor.effectiveness.min(100);
        }
        self.principles
            .sort_by(|a, b| b.effectiveness.cmp(&a.effectiveness));
        self.biases
            .sort_by(|a, b| b.effectiveness.cmp(&a.effectiveness));
    }
}

/// Provenance of a profile: real model output or the heuristic fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    Model,
    Heuristic,
}

/// A profile together with its provenance. There is no failure variant:
/// the agent always produces a complete profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileOutcome {
    pub profile: PsychologyProfile,
    pub source: ProfileSource,
}
