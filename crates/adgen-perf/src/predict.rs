//! Stage 2: CTR prediction.
//!
//! Starts from the industry average and applies multiplicative
//! adjustments for each feature group. Multipliers are individually
//! mild; the final value is clamped to `[0.3, 6.0]` exactly once, at
//! the end of the chain, so intermediate products stay comparable
//! between creatives.

use crate::benchmarks::{percentile, Benchmark};
use crate::types::{CtrPrediction, PerformanceFeatures};

/// Hard bounds on any predicted CTR, percent.
pub(crate) const CTR_FLOOR: f32 = 0.3;
pub(crate) const CTR_CEILING: f32 = 6.0;

const OPTIMAL_HEADLINE_CHARS: f32 = 50.0;

pub(crate) fn predict_ctr(features: &PerformanceFeatures) -> CtrPrediction {
    let benchmark = Benchmark {
        industry: "",
        avg_ctr: features.context.base_ctr,
        top_10_percent: features.context.top_decile_ctr,
    };

    let mut ctr = features.context.base_ctr;
    ctr *= composition_multiplier(features.visual.average());
    ctr *= cta_multiplier(features.copy.cta_visibility);
    ctr *= headline_length_multiplier(features.copy.headline_length);
    ctr *= power_word_multiplier(features.copy.power_word_count);
    ctr *= emotional_multiplier(features.copy.emotional_score);
    ctr *= brand_multiplier(features.design.brand_consistency);
    if features.copy.has_digits {
        ctr *= 1.05;
    }
    if features.copy.has_urgency {
        ctr *= 1.06;
    }
    if features.copy.question_hook {
        ctr *= 1.03;
    }
    let predicted = ctr.clamp(CTR_FLOOR, CTR_CEILING);

    let confidence = estimate_confidence(features);
    let half_band = predicted * (1.0 - confidence);

    CtrPrediction {
        predicted_ctr: predicted,
        confidence,
        interval_low: (predicted - half_band).max(0.0),
        interval_high: predicted + half_band,
        percentile: percentile(predicted, &benchmark),
    }
}

/// Visual average 0 maps to 0.85, 100 to 1.15.
fn composition_multiplier(visual_avg: f32) -> f32 {
    0.85 + visual_avg / 100.0 * 0.30
}

/// CTA visibility 0 maps to 0.85, 100 to 1.10.
fn cta_multiplier(visibility: f32) -> f32 {
    0.85 + visibility / 100.0 * 0.25
}

/// Neutral (1.0) at exactly 50 chars; up to 15% penalty as the headline
/// drifts toward empty or toward double the optimum.
pub(crate) fn headline_length_multiplier(chars: u32) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let deviation = ((chars as f32 - OPTIMAL_HEADLINE_CHARS).abs() / OPTIMAL_HEADLINE_CHARS)
        .min(1.0);
    1.0 - 0.15 * deviation
}

/// Each power word adds 4%, saturating at five.
fn power_word_multiplier(count: u32) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    {
        1.0 + 0.04 * count.min(5) as f32
    }
}

/// Emotional score 0 maps to 0.90, 100 to 1.10.
fn emotional_multiplier(score: f32) -> f32 {
    0.90 + score / 100.0 * 0.20
}

/// Brand consistency 0 maps to 0.95, 100 to 1.03.
fn brand_multiplier(score: f32) -> f32 {
    0.95 + score / 100.0 * 0.08
}

/// Base 0.7; completeness of the input earns up to 0.2 more.
fn estimate_confidence(features: &PerformanceFeatures) -> f32 {
    let mut confidence = 0.70f32;
    if features.copy.cta_length > 0 {
        confidence += 0.05;
    }
    if features.copy.description_length >= 40 {
        confidence += 0.05;
    }
    if features.copy.power_word_count > 0 {
        confidence += 0.05;
    }
    if features.context.industry != "default" {
        confidence += 0.05;
    }
    confidence.min(0.90)
}

/// Single 0–100 number: 80 points for CTR at the industry top decile,
/// up to 20 for the averaged feature groups, capped at 100 overall.
pub(crate) fn overall_score(features: &PerformanceFeatures, ctr: &CtrPrediction) -> u8 {
    let ctr_points = ctr.predicted_ctr / features.context.top_decile_ctr * 80.0;
    let group_avg = (features.visual.average() + features.copy.average() + features.design.average()) / 3.0;
    let feature_points = group_avg / 5.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (ctr_points + feature_points).round().min(100.0) as u8
    }
}
