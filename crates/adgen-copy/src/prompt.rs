//! Prompt construction for the copy agent.
//!
//! Prompts are opaque string formatting with no control-flow significance;
//! keeping them here keeps the scorer pure and unit-testable offline.

use adgen_core::{Brief, HookAngle};

/// Builds the per-angle generation prompt for one brief.
#[must_use]
pub fn build_prompt(brief: &Brief, angle: HookAngle) -> String {
    let offer_line = brief
        .offer
        .as_deref()
        .map(|o| format!("Current offer (quote it verbatim where natural): {o}\n"))
        .unwrap_or_default();

    format!(
        "You are a direct-response copywriter. Write one ad in {language} \
         using the \"{label}\" persuasive framing.\n\
         Product: {product}\n\
         Description: {description}\n\
         Audience: {audience}\n\
         Tone: {tone}\n\
         {offer_line}\
         Respond with strict JSON only, no prose, using exactly these keys:\n\
         {{\"headline\": string, \"subheadline\": string, \"description\": string, \"cta\": string}}\n\
         Keep the headline under 10 words.",
        language = brief.language,
        label = angle.label(),
        product = brief.product_name,
        description = brief.description,
        audience = brief.audience,
        tone = brief.tone.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use adgen_core::{Brief, RawBriefInput};

    fn brief() -> Brief {
        Brief::from_raw(&RawBriefInput {
            product_name: "GlowDesk".to_string(),
            description: "An adjustable standing desk for remote workers".to_string(),
            audience: "remote workers".to_string(),
            offer: Some("20% off".to_string()),
            tone: Some("professional".to_string()),
            language: None,
            format: None,
            industry: None,
            image_ref: None,
        })
        .expect("valid brief")
    }

    #[test]
    fn prompt_names_product_and_angle() {
        let prompt = build_prompt(&brief(), HookAngle::Scarcity);
        assert!(prompt.contains("GlowDesk"));
        assert!(prompt.contains("Scarcity"));
        assert!(prompt.contains("20% off"));
        assert!(prompt.contains("strict JSON"));
    }

    #[test]
    fn prompt_omits_offer_line_when_absent() {
        let mut b = brief();
        b.offer = None;
        let prompt = build_prompt(&b, HookAngle::SocialProof);
        assert!(!prompt.contains("Current offer"));
    }

    #[test]
    fn each_angle_yields_a_distinct_prompt() {
        let b = brief();
        let prompts: Vec<String> = HookAngle::ALL
            .iter()
            .map(|a| build_prompt(&b, *a))
            .collect();
        for (i, p) in prompts.iter().enumerate() {
            for q in &prompts[i + 1..] {
                assert_ne!(p, q);
            }
        }
    }
}
