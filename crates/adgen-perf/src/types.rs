//! Input and output shapes for the performance pipeline.

use adgen_core::Tone;
use serde::{Deserialize, Serialize};

/// What the creative looks like, as flags supplied by the caller. The
/// pipeline never inspects image bytes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VisualFlags {
    pub has_image: bool,
    pub has_human_face: bool,
    pub has_product_shot: bool,
    pub has_logo: bool,
    pub brand_colors_consistent: bool,
}

/// One creative to predict performance for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceInput {
    pub headline: String,
    pub description: String,
    pub cta: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub visual: VisualFlags,
}

/// Visual-composition features, each `[0, 100]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VisualFeatures {
    pub composition: f32,
    pub focal_clarity: f32,
    pub human_presence: f32,
    pub product_prominence: f32,
    pub logo_visibility: f32,
    pub color_harmony: f32,
    pub visual_hierarchy: f32,
    pub image_text_balance: f32,
}

impl VisualFeatures {
    pub(crate) fn average(&self) -> f32 {
        (self.composition
            + self.focal_clarity
            + self.human_presence
            + self.product_prominence
            + self.logo_visibility
            + self.color_harmony
            + self.visual_hierarchy
            + self.image_text_balance)
            / 8.0
    }
}

/// Copy features. Counts and lengths are raw; scores are `[0, 100]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CopyFeatures {
    pub headline_length: u32,
    pub headline_word_count: u32,
    pub description_length: u32,
    /// Mean alphanumeric word length; a ratio, not a score.
    pub avg_word_length: f32,
    pub readability: f32,
    pub power_word_count: u32,
    pub emotional_score: f32,
    pub cta_length: u32,
    pub cta_visibility: f32,
    pub cta_strength: f32,
    pub has_digits: bool,
    pub has_urgency: bool,
    pub question_hook: bool,
}

impl CopyFeatures {
    /// Mean of the score-typed fields only; raw counts are excluded.
    pub(crate) fn average(&self) -> f32 {
        (self.readability + self.emotional_score + self.cta_visibility + self.cta_strength) / 4.0
    }
}

/// Design/layout proxies derived from copy density and visual flags,
/// each `[0, 100]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DesignFeatures {
    pub layout_balance: f32,
    pub text_density: f32,
    pub cta_prominence: f32,
    pub brand_consistency: f32,
    pub color_contrast: f32,
    pub mobile_readability: f32,
}

impl DesignFeatures {
    pub(crate) fn average(&self) -> f32 {
        (self.layout_balance
            + self.text_density
            + self.cta_prominence
            + self.brand_consistency
            + self.color_contrast
            + self.mobile_readability)
            / 6.0
    }
}

/// Placement context resolved from the benchmark table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextFeatures {
    pub industry: String,
    /// Industry average CTR, percent. A ratio, not a score.
    pub base_ctr: f32,
    /// Industry top-decile CTR, percent. A ratio, not a score.
    pub top_decile_ctr: f32,
    pub tone_energy: f32,
}

/// The full extracted feature vector, four groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceFeatures {
    pub visual: VisualFeatures,
    pub copy: CopyFeatures,
    pub design: DesignFeatures,
    pub context: ContextFeatures,
}

/// CTR prediction with its confidence band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CtrPrediction {
    /// Percent, always within `[0.3, 6.0]`.
    pub predicted_ctr: f32,
    /// `[0.7, 0.9]`.
    pub confidence: f32,
    /// Symmetric band around the prediction.
    pub interval_low: f32,
    pub interval_high: f32,
    /// Placement against the industry benchmark distribution, 1–99.
    pub percentile: u8,
}

/// Everything the pipeline produces for one creative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub features: PerformanceFeatures,
    pub ctr: CtrPrediction,
    /// Ranked improvement drivers, most negative impact first.
    pub drivers: Vec<crate::factors::Driver>,
    /// Single 0–100 headline number for ranking and display.
    pub overall: u8,
}
