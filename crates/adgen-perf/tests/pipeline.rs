//! End-to-end checks on the full predict pipeline.

use adgen_core::Tone;
use adgen_perf::{predict, PerformanceInput, VisualFlags};

fn strong_input() -> PerformanceInput {
    PerformanceInput {
        headline: "Fix your back pain in 14 days, guaranteed".to_string(),
        description: "The ergonomic desk proven to end slouching for remote workers.".to_string(),
        cta: "Start free trial".to_string(),
        industry: Some("ecommerce".to_string()),
        tone: Tone::Friendly,
        visual: VisualFlags {
            has_image: true,
            has_human_face: true,
            has_product_shot: true,
            has_logo: true,
            brand_colors_consistent: true,
        },
    }
}

fn weak_input() -> PerformanceInput {
    PerformanceInput {
        headline: "Our comprehensive organizational productivity solution".to_string(),
        description: "A thing.".to_string(),
        cta: String::new(),
        industry: None,
        tone: Tone::Professional,
        visual: VisualFlags::default(),
    }
}

#[test]
fn pipeline_is_deterministic() {
    let input = strong_input();
    let a = serde_json::to_value(predict(&input)).unwrap();
    let b = serde_json::to_value(predict(&input)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn strong_creative_outscores_weak_one() {
    let strong = predict(&strong_input());
    let weak = predict(&weak_input());
    assert!(strong.ctr.predicted_ctr > weak.ctr.predicted_ctr);
    assert!(strong.overall > weak.overall);
    assert!(strong.drivers.len() < weak.drivers.len());
}

#[test]
fn report_invariants_hold() {
    for input in [strong_input(), weak_input()] {
        let report = predict(&input);
        assert!((0.3..=6.0).contains(&report.ctr.predicted_ctr));
        assert!((0.7..=0.9).contains(&report.ctr.confidence));
        assert!((1..=99).contains(&report.ctr.percentile));
        assert!(report.overall <= 100);
        assert!(report.ctr.interval_low <= report.ctr.interval_high);
    }
}
