//! Per-angle fan-out and variant assembly.

use futures::future::join_all;
use serde::Deserialize;
use uuid::Uuid;

use adgen_completion::{CompletionClient, CompletionContext, CompletionError, CompletionRequest};
use adgen_core::lexicon::extract_power_words;
use adgen_core::{rank_default, Brief, CopyVariant, HookAngle};

use crate::error::CopyError;
use crate::prompt::build_prompt;
use crate::scorer::{score, VariantText};

/// Expected JSON shape of one completion response.
#[derive(Debug, Deserialize)]
struct RawVariant {
    headline: String,
    #[serde(default)]
    subheadline: String,
    description: String,
    cta: String,
}

/// Generates scored variants for a brief: one completion per hook angle,
/// dispatched in parallel. Failed angles are logged and dropped; the call
/// errors only when all five fail. Output is ranked (total descending,
/// angle-order tie-break) and never empty on success.
///
/// # Errors
///
/// [`CopyError::AllAnglesFailed`] carrying the first angle's failure as
/// the representative cause.
pub async fn generate_variants(
    client: &CompletionClient,
    model: &str,
    brief: &Brief,
    ctx: &CompletionContext,
) -> Result<Vec<CopyVariant>, CopyError> {
    let calls = HookAngle::ALL.iter().map(|angle| {
        let angle = *angle;
        async move {
            let result = generate_one(client, model, brief, angle, ctx).await;
            (angle, result)
        }
    });

    let settled = join_all(calls).await;

    let mut variants = Vec::new();
    let mut first_err: Option<CompletionError> = None;
    for (angle, result) in settled {
        match result {
            Ok(variant) => variants.push(variant),
            Err(err) => {
                tracing::warn!(angle = %angle, error = %err, "copy angle failed; dropping");
                first_err.get_or_insert(err);
            }
        }
    }

    if variants.is_empty() {
        return Err(CopyError::AllAnglesFailed {
            attempted: HookAngle::ALL.len(),
            // first_err is always set here: no variants means every angle errored.
            first: first_err.unwrap_or(CompletionError::Cancelled),
        });
    }

    Ok(rank_default(variants))
}

async fn generate_one(
    client: &CompletionClient,
    model: &str,
    brief: &Brief,
    angle: HookAngle,
    ctx: &CompletionContext,
) -> Result<CopyVariant, CompletionError> {
    let request = CompletionRequest::new(model, build_prompt(brief, angle))
        .with_temperature(0.9)
        .json_only();
    let text = client.complete(&request, ctx).await?;
    parse_variant(angle, &text, brief)
}

/// Parses one completion response into a scored variant.
fn parse_variant(
    angle: HookAngle,
    response: &str,
    brief: &Brief,
) -> Result<CopyVariant, CompletionError> {
    let body = strip_code_fence(response);
    let raw: RawVariant =
        serde_json::from_str(body).map_err(|e| CompletionError::Deserialize {
            context: format!("copy variant (angle={angle})"),
            source: e,
        })?;

    let text = VariantText {
        headline: &raw.headline,
        subheadline: &raw.subheadline,
        description: &raw.description,
        cta: &raw.cta,
    };
    let scores = score(&text, brief.offer.as_deref());
    let power_words = extract_power_words(&format!(
        "{} {} {} {}",
        raw.headline, raw.subheadline, raw.description, raw.cta
    ));

    Ok(CopyVariant {
        id: Uuid::new_v4(),
        angle,
        headline: raw.headline,
        subheadline: raw.subheadline,
        description: raw.description,
        cta: raw.cta,
        scores,
        power_words,
    })
}

/// Models occasionally wrap JSON in a markdown fence despite the
/// JSON-only instruction; tolerate that one deviation.
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
