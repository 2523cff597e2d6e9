//! Model path with total fallback.

use adgen_completion::{CompletionClient, CompletionContext, CompletionError, CompletionRequest};
use adgen_core::Brief;

use crate::heuristics::heuristic_profile;
use crate::prompt::build_prompt;
use crate::types::{ProfileOutcome, ProfileSource, PsychologyProfile};

/// Confidence assigned to a profile parsed from the model.
pub const MODEL_CONFIDENCE: f32 = 0.82;
/// Confidence assigned to the heuristic fallback profile.
pub const HEURISTIC_CONFIDENCE: f32 = 0.65;

/// Produces an audience profile for the brief. Infallible by design: any
/// failure on the model path — network, quota, malformed JSON, incomplete
/// schema — drops to the heuristic profile, which populates every field.
pub async fn analyze(
    client: &CompletionClient,
    model: &str,
    brief: &Brief,
    ctx: &CompletionContext,
) -> ProfileOutcome {
    match model_profile(client, model, brief, ctx).await {
        Ok(profile) => ProfileOutcome {
            profile,
            source: ProfileSource::Model,
        },
        Err(err) => {
            tracing::warn!(
                error = %err,
                "psychology model path failed; using heuristic fallback"
            );
            ProfileOutcome {
                profile: heuristic_profile(brief),
                source: ProfileSource::Heuristic,
            }
        }
    }
}

async fn model_profile(
    client: &CompletionClient,
    model: &str,
    brief: &Brief,
    ctx: &CompletionContext,
) -> Result<PsychologyProfile, CompletionError> {
    let request = CompletionRequest::new(model, build_prompt(brief))
        .with_temperature(0.2)
        .json_only();
    let text = client.complete(&request, ctx).await?;
    parse_profile(&text)
}

/// Strict parse plus schema-completeness check. A profile missing factors
/// is treated as a parse failure so it falls back rather than propagating
/// a partial object.
fn parse_profile(text: &str) -> Result<PsychologyProfile, CompletionError> {
    let mut profile: PsychologyProfile =
        serde_json::from_str(text.trim()).map_err(|e| CompletionError::Deserialize {
            context: "psychology profile".to_string(),
            source: e,
        })?;

    if profile.principles.len() != crate::types::PERSUASION_PRINCIPLES.len() {
        return Err(CompletionError::Backend(format!(
            "profile has {} principles, expected {}",
            profile.principles.len(),
            crate::types::PERSUASION_PRINCIPLES.len()
        )));
    }
    if profile.biases.len() != crate::types::COGNITIVE_BIASES.len() {
        return Err(CompletionError::Backend(format!(
            "profile has {} biases, expected {}",
            profile.biases.len(),
            crate::types::COGNITIVE_BIASES.len()
        )));
    }
    if profile.emotional.primary_emotions.is_empty() {
        return Err(CompletionError::Backend(
            "profile has no primary emotions".to_string(),
        ));
    }

    profile.normalize();
    // Model-path confidence is fixed; the model's self-reported value is
    // not trusted for ranking across jobs.
    profile.confidence = MODEL_CONFIDENCE;
    Ok(profile)
}
