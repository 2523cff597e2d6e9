//! Stage 3: factor analysis.
//!
//! Compares each scored feature against a hand-set optimum and emits
//! the drivers whose deviation is large enough to act on, most harmful
//! first. Impacts are signed deltas on the 0–100 feature scale.

use serde::{Deserialize, Serialize};

use crate::types::PerformanceFeatures;

/// One feature's contribution to the prediction, with a concrete fix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    /// Dotted feature path, e.g. `copy.cta_visibility`.
    pub feature: String,
    /// Signed deviation from the optimum; negative drags CTR down.
    pub impact: f32,
    pub suggestion: String,
}

/// Deviations smaller than this are noise, not drivers.
const IMPACT_THRESHOLD: f32 = 8.0;

struct Check {
    feature: &'static str,
    optimum: f32,
    low_suggestion: &'static str,
    high_suggestion: &'static str,
}

pub(crate) fn analyze_factors(features: &PerformanceFeatures) -> Vec<Driver> {
    let checks = [
        (
            features.copy.cta_visibility,
            Check {
                feature: "copy.cta_visibility",
                optimum: 90.0,
                low_suggestion: "Shorten the CTA to 15 characters or fewer",
                high_suggestion: "CTA visibility is already maximal",
            },
        ),
        (
            features.copy.cta_strength,
            Check {
                feature: "copy.cta_strength",
                optimum: 85.0,
                low_suggestion: "Open the CTA with an action verb such as Get, Start, or Claim",
                high_suggestion: "CTA verb is already strong",
            },
        ),
        (
            features.copy.emotional_score,
            Check {
                feature: "copy.emotional_score",
                optimum: 80.0,
                low_suggestion: "Work a power word or concrete feeling into the headline",
                high_suggestion: "Dial the emotional language back toward the concrete benefit",
            },
        ),
        (
            features.copy.readability,
            Check {
                feature: "copy.readability",
                optimum: 70.0,
                low_suggestion: "Break up long sentences and prefer short words",
                high_suggestion: "Copy may read as thin; add one specific detail",
            },
        ),
        (
            features.visual.human_presence,
            Check {
                feature: "visual.human_presence",
                optimum: 85.0,
                low_suggestion: "Add a human face; faces reliably lift paid-social CTR",
                high_suggestion: "Human presence is already strong",
            },
        ),
        (
            features.visual.product_prominence,
            Check {
                feature: "visual.product_prominence",
                optimum: 80.0,
                low_suggestion: "Show the product itself rather than an abstract visual",
                high_suggestion: "Product shot is already prominent",
            },
        ),
        (
            features.design.brand_consistency,
            Check {
                feature: "design.brand_consistency",
                optimum: 85.0,
                low_suggestion: "Use the brand palette consistently across the creative",
                high_suggestion: "Brand consistency is already strong",
            },
        ),
        (
            features.design.text_density,
            Check {
                feature: "design.text_density",
                optimum: 80.0,
                low_suggestion: "Trim the description toward 40-160 characters",
                high_suggestion: "Text density is already in the sweet spot",
            },
        ),
    ];

    let mut drivers: Vec<Driver> = checks
        .into_iter()
        .filter_map(|(value, check)| {
            let impact = value - check.optimum;
            if impact.abs() < IMPACT_THRESHOLD {
                return None;
            }
            let suggestion = if impact < 0.0 {
                check.low_suggestion
            } else {
                check.high_suggestion
            };
            Some(Driver {
                feature: check.feature.to_string(),
                impact,
                suggestion: suggestion.to_string(),
            })
        })
        .collect();

    // Most negative first. Impacts are finite by construction, so a
    // total order exists; ties keep check order.
    drivers.sort_by(|a, b| a.impact.total_cmp(&b.impact));
    drivers
}
