//! Prompt construction for the psychology agent.

use adgen_core::Brief;

use crate::types::{COGNITIVE_BIASES, PERSUASION_PRINCIPLES};

/// Builds the low-temperature, JSON-only profiling prompt.
#[must_use]
pub fn build_prompt(brief: &Brief) -> String {
    format!(
        "You are an audience-psychology analyst. Model the audience below and \
         respond with strict JSON only, no prose, no markdown.\n\
         Product: {product}\n\
         Description: {description}\n\
         Audience: {audience}\n\
         Tone: {tone}\n\
         Required JSON shape:\n\
         {{\"ocean\": {{\"openness\": 0.0-1.0, \"conscientiousness\": 0.0-1.0, \
         \"extraversion\": 0.0-1.0, \"agreeableness\": 0.0-1.0, \"neuroticism\": 0.0-1.0}},\n\
         \"principles\": [{{\"name\": one of {principles:?}, \"effectiveness\": 0-100, \
         \"application\": string}}] (all six),\n\
         \"biases\": [{{\"name\": one of {biases:?}, \"effectiveness\": 0-100, \
         \"application\": string}}] (all ten),\n\
         \"emotional\": {{\"primary_emotions\": [string], \"arc\": \
         \"problem_solution\"|\"aspiration\"|\"fear_relief\", \"triggers\": [string], \
         \"avoidances\": [string]}},\n\
         \"recommendations\": [string],\n\
         \"confidence\": 0.0-1.0}}",
        product = brief.product_name,
        description = brief.description,
        audience = brief.audience,
        tone = brief.tone.as_str(),
        principles = PERSUASION_PRINCIPLES,
        biases = COGNITIVE_BIASES,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use adgen_core::RawBriefInput;

    #[test]
    fn prompt_lists_all_required_factor_names() {
        let brief = Brief::from_raw(&RawBriefInput {
            product_name: "GlowDesk".to_string(),
            description: "An adjustable standing desk".to_string(),
            audience: "remote workers".to_string(),
            offer: None,
            tone: None,
            language: None,
            format: None,
            industry: None,
            image_ref: None,
        })
        .expect("valid brief");

        let prompt = build_prompt(&brief);
        for name in PERSUASION_PRINCIPLES.iter().chain(COGNITIVE_BIASES.iter()) {
            assert!(prompt.contains(name), "prompt must name {name}");
        }
        assert!(prompt.contains("strict JSON"));
    }
}
