//! Performance agent: deterministic CTR prediction and factor analysis.
//!
//! Despite the name there is no trained model here. The pipeline is a
//! versioned, pure scoring function — extract features, predict CTR from
//! industry benchmarks with multiplicative adjustments, then rank the
//! features whose deviation from optimum drives the result. Same input,
//! same output, always; that is what makes it snapshot-testable.

mod benchmarks;
mod factors;
mod features;
mod predict;
mod types;

pub use benchmarks::{lookup_benchmark, Benchmark};
pub use factors::Driver;
pub use features::{count_power_words, estimate_cta_visibility, estimate_readability};
pub use types::{
    ContextFeatures, CopyFeatures, CtrPrediction, DesignFeatures, PerformanceFeatures,
    PerformanceInput, PerformanceReport, VisualFeatures, VisualFlags,
};

use factors::analyze_factors;
use features::extract;
use predict::{overall_score, predict_ctr};

/// Runs the full three-stage pipeline: extract, predict, analyze.
#[must_use]
pub fn predict(input: &PerformanceInput) -> PerformanceReport {
    let features = extract(input);
    let ctr = predict_ctr(&features);
    let drivers = analyze_factors(&features);
    let overall = overall_score(&features, &ctr);

    PerformanceReport {
        features,
        ctr,
        drivers,
        overall,
    }
}
