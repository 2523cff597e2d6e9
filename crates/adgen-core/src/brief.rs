//! Raw brief input and its normalization into an immutable [`Brief`].
//!
//! Normalization is synchronous and pure: it trims and validates the raw
//! form fields, parses the tone/format enums (falling back to defaults on
//! unknown values), derives one angle entry per hook angle, and scans the
//! text for compliance risk flags. No network calls happen here.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::lexicon;
use crate::variant::HookAngle;

/// Raw form fields as submitted by the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBriefInput {
    pub product_name: String,
    pub description: String,
    pub audience: String,
    #[serde(default)]
    pub offer: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    /// Industry vertical for benchmark lookup; unknown values resolve to
    /// the default bucket downstream.
    #[serde(default)]
    pub industry: Option<String>,
    /// Opaque reference to an uploaded image, if any. Passed through; the
    /// pipeline never fetches it.
    #[serde(default)]
    pub image_ref: Option<String>,
}

/// Voice of the generated copy. Unknown raw values fall back to `Friendly`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Friendly,
    Professional,
    Luxury,
    Playful,
    Urgent,
    Bold,
}

impl Tone {
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "professional" => Tone::Professional,
            "luxury" => Tone::Luxury,
            "playful" => Tone::Playful,
            "urgent" => Tone::Urgent,
            "bold" => Tone::Bold,
            _ => Tone::Friendly,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Friendly => "friendly",
            Tone::Professional => "professional",
            Tone::Luxury => "luxury",
            Tone::Playful => "playful",
            Tone::Urgent => "urgent",
            Tone::Bold => "bold",
        }
    }
}

/// Target ad format. Unknown raw values fall back to `SingleImage`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdFormat {
    #[default]
    SingleImage,
    Video,
    Carousel,
    Story,
}

impl AdFormat {
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "video" => AdFormat::Video,
            "carousel" => AdFormat::Carousel,
            "story" => AdFormat::Story,
            _ => AdFormat::SingleImage,
        }
    }
}

/// One persuasive framing judged applicable to the brief.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Angle {
    pub id: String,
    pub label: String,
    pub rationale: String,
}

/// A compliance concern detected in the raw text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFlag {
    pub code: String,
    pub detail: String,
}

/// Normalized product/audience/offer description. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brief {
    pub product_name: String,
    pub description: String,
    pub audience: String,
    pub offer: Option<String>,
    pub tone: Tone,
    pub language: String,
    pub format: AdFormat,
    pub industry: Option<String>,
    pub image_ref: Option<String>,
    pub angles: Vec<Angle>,
    pub risk_flags: Vec<RiskFlag>,
}

const ABSOLUTE_CLAIM_WORDS: &[&str] = &["guaranteed", "100%", "best ever", "#1", "no risk"];
const MEDICAL_CLAIM_WORDS: &[&str] = &["cure", "cures", "heals", "treats", "clinically proven"];
const FINANCIAL_CLAIM_WORDS: &[&str] = &["get rich", "free money", "double your money"];

impl Brief {
    /// Normalizes raw form input into a `Brief`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Validation`] when `product_name`,
    /// `description`, or `audience` is empty after trimming, or when the
    /// description is too short to generate from.
    pub fn from_raw(raw: &RawBriefInput) -> Result<Self, GenerationError> {
        let product_name = raw.product_name.trim().to_string();
        let description = raw.description.trim().to_string();
        let audience = raw.audience.trim().to_string();

        if product_name.is_empty() {
            return Err(GenerationError::Validation(
                "product_name must not be empty".to_string(),
            ));
        }
        if description.is_empty() {
            return Err(GenerationError::Validation(
                "description must not be empty".to_string(),
            ));
        }
        if description.chars().count() < 10 {
            return Err(GenerationError::Validation(
                "description is too short to generate from (min 10 characters)".to_string(),
            ));
        }
        if audience.is_empty() {
            return Err(GenerationError::Validation(
                "audience must not be empty".to_string(),
            ));
        }

        let offer = raw
            .offer
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned);

        let tone = raw
            .tone
            .as_deref()
            .map_or_else(Tone::default, Tone::parse_or_default);
        let format = raw
            .format
            .as_deref()
            .map_or_else(AdFormat::default, AdFormat::parse_or_default);
        let language = raw
            .language
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("en")
            .to_lowercase();

        let industry = raw
            .industry
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let image_ref = raw
            .image_ref
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned);

        let angles = derive_angles(&description, &audience, offer.as_deref());
        let risk_flags = derive_risk_flags(&product_name, &description, offer.as_deref());

        Ok(Brief {
            product_name,
            description,
            audience,
            offer,
            tone,
            language,
            format,
            industry,
            image_ref,
            angles,
            risk_flags,
        })
    }
}

/// Builds one angle entry per hook angle with a rationale grounded in the
/// brief's own signals. Deterministic: same input, same angles.
fn derive_angles(description: &str, audience: &str, offer: Option<&str>) -> Vec<Angle> {
    HookAngle::ALL
        .iter()
        .map(|angle| {
            let rationale = match angle {
                HookAngle::ProblemAgitate => {
                    if lexicon::contains_any(description, lexicon::EMOTIONAL_WORDS) {
                        "description names a felt pain; lead with the problem".to_string()
                    } else {
                        "surface the underlying problem the product removes".to_string()
                    }
                }
                HookAngle::SocialProof => {
                    format!("show that people like \"{audience}\" already use this")
                }
                HookAngle::Scarcity => offer.map_or_else(
                    || "frame availability as limited to prompt action".to_string(),
                    |o| format!("the offer \"{o}\" supports a time-bound framing"),
                ),
                HookAngle::CuriosityGap => {
                    "withhold the mechanism to earn the click".to_string()
                }
                HookAngle::DreamOutcome => {
                    "paint the after-state the audience wants".to_string()
                }
            };
            Angle {
                id: angle.as_str().to_string(),
                label: angle.label().to_string(),
                rationale,
            }
        })
        .collect()
}

/// Scans the combined raw text for compliance lexicon hits.
fn derive_risk_flags(product_name: &str, description: &str, offer: Option<&str>) -> Vec<RiskFlag> {
    let combined = format!("{product_name} {description} {}", offer.unwrap_or(""));
    let mut flags = Vec::new();

    if lexicon::contains_any(&combined, ABSOLUTE_CLAIM_WORDS) {
        flags.push(RiskFlag {
            code: "absolute_claim".to_string(),
            detail: "copy contains an absolute or superlative claim; platforms may reject it"
                .to_string(),
        });
    }
    if lexicon::contains_any(&combined, MEDICAL_CLAIM_WORDS) {
        flags.push(RiskFlag {
            code: "medical_claim".to_string(),
            detail: "copy implies a medical outcome; requires substantiation".to_string(),
        });
    }
    if lexicon::contains_any(&combined, FINANCIAL_CLAIM_WORDS) {
        flags.push(RiskFlag {
            code: "financial_claim".to_string(),
            detail: "copy promises financial gain; restricted on most ad platforms".to_string(),
        });
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawBriefInput {
        RawBriefInput {
            product_name: "GlowDesk".to_string(),
            description: "An adjustable standing desk that ends back pain for remote workers"
                .to_string(),
            audience: "remote workers aged 30-45".to_string(),
            offer: Some("20% off this week".to_string()),
            tone: Some("luxury".to_string()),
            language: None,
            format: Some("video".to_string()),
            industry: None,
            image_ref: None,
        }
    }

    #[test]
    fn from_raw_normalizes_valid_input() {
        let brief = Brief::from_raw(&raw()).expect("valid brief");
        assert_eq!(brief.tone, Tone::Luxury);
        assert_eq!(brief.format, AdFormat::Video);
        assert_eq!(brief.language, "en");
        assert_eq!(brief.angles.len(), 5);
        assert_eq!(brief.offer.as_deref(), Some("20% off this week"));
    }

    #[test]
    fn from_raw_rejects_empty_product_name() {
        let mut input = raw();
        input.product_name = "   ".to_string();
        let err = Brief::from_raw(&input).expect_err("should fail validation");
        assert!(matches!(err, GenerationError::Validation(_)));
    }

    #[test]
    fn from_raw_rejects_short_description() {
        let mut input = raw();
        input.description = "too short".to_string();
        // 9 chars — below the minimum.
        assert!(Brief::from_raw(&input).is_err());
    }

    #[test]
    fn industry_and_image_ref_are_carried_through() {
        let mut input = raw();
        input.industry = Some("  Finance ".to_string());
        input.image_ref = Some("upload/abc123".to_string());
        let brief = Brief::from_raw(&input).expect("valid brief");
        assert_eq!(brief.industry.as_deref(), Some("finance"));
        assert_eq!(brief.image_ref.as_deref(), Some("upload/abc123"));
    }

    #[test]
    fn blank_industry_normalizes_to_none() {
        let mut input = raw();
        input.industry = Some("   ".to_string());
        let brief = Brief::from_raw(&input).expect("valid brief");
        assert!(brief.industry.is_none());
    }

    #[test]
    fn unknown_tone_falls_back_to_friendly() {
        let mut input = raw();
        input.tone = Some("sassy".to_string());
        let brief = Brief::from_raw(&input).expect("valid brief");
        assert_eq!(brief.tone, Tone::Friendly);
    }

    #[test]
    fn guaranteed_claim_raises_risk_flag() {
        let mut input = raw();
        input.description = "Guaranteed to end back pain for remote workers forever".to_string();
        let brief = Brief::from_raw(&input).expect("valid brief");
        assert!(brief.risk_flags.iter().any(|f| f.code == "absolute_claim"));
    }

    #[test]
    fn clean_copy_has_no_risk_flags() {
        let mut input = raw();
        input.offer = None;
        let brief = Brief::from_raw(&input).expect("valid brief");
        assert!(brief.risk_flags.is_empty());
    }

    #[test]
    fn angles_are_in_canonical_order() {
        let brief = Brief::from_raw(&raw()).expect("valid brief");
        let ids: Vec<&str> = brief.angles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "problem_agitate",
                "social_proof",
                "scarcity",
                "curiosity_gap",
                "dream_outcome"
            ]
        );
    }
}
