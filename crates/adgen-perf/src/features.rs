//! Stage 1: feature extraction. Small pure functions only.

use adgen_core::{lexicon, Tone};

use crate::benchmarks::lookup_benchmark;
use crate::types::{
    ContextFeatures, CopyFeatures, DesignFeatures, PerformanceFeatures, PerformanceInput,
    VisualFeatures, VisualFlags,
};

/// Re-export of the shared power-word counter so callers of this crate
/// can use it without also depending on the lexicon module directly.
#[must_use]
pub fn count_power_words(text: &str) -> usize {
    lexicon::count_power_words(text)
}

/// CTA visibility from string length buckets.
///
/// Short CTAs render large and unbroken on every placement: up to 15
/// chars scores 90, 16–20 scores 80, longer scores 70. An empty CTA is
/// nearly invisible and scores 40.
#[must_use]
pub fn estimate_cta_visibility(cta: &str) -> f32 {
    let len = cta.trim().chars().count();
    if len == 0 {
        40.0
    } else if len <= 15 {
        90.0
    } else if len <= 20 {
        80.0
    } else {
        70.0
    }
}

/// Flesch–Kincaid-style reading-ease estimate, clamped to `[0, 100]`.
#[must_use]
pub fn estimate_readability(text: &str) -> f32 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 50.0;
    }
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1);
    let syllables: usize = words.iter().map(|w| estimate_syllables(w)).sum();

    #[allow(clippy::cast_precision_loss)]
    let (w, s, y) = (words.len() as f32, sentences as f32, syllables as f32);
    let score = 206.835 - 1.015 * (w / s) - 84.6 * (y / w);
    score.clamp(0.0, 100.0)
}

/// Counts vowel groups as a syllable proxy; every word has at least one.
fn estimate_syllables(word: &str) -> usize {
    let mut count = 0usize;
    let mut prev_vowel = false;
    for c in word.to_lowercase().chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    count.max(1)
}

/// Extracts the full four-group feature vector for one creative.
pub(crate) fn extract(input: &PerformanceInput) -> PerformanceFeatures {
    PerformanceFeatures {
        visual: extract_visual(&input.visual),
        copy: extract_copy(input),
        design: extract_design(input),
        context: extract_context(input),
    }
}

fn extract_visual(flags: &VisualFlags) -> VisualFeatures {
    let base: f32 = if flags.has_image { 70.0 } else { 45.0 };
    VisualFeatures {
        composition: base + if flags.has_product_shot { 10.0 } else { 0.0 },
        focal_clarity: if flags.has_product_shot { 80.0 } else { 60.0 },
        human_presence: if flags.has_human_face { 85.0 } else { 40.0 },
        product_prominence: if flags.has_product_shot { 85.0 } else { 50.0 },
        logo_visibility: if flags.has_logo { 75.0 } else { 30.0 },
        color_harmony: if flags.brand_colors_consistent { 80.0 } else { 55.0 },
        visual_hierarchy: base,
        image_text_balance: if flags.has_image { 75.0 } else { 50.0 },
    }
}

fn extract_copy(input: &PerformanceInput) -> CopyFeatures {
    let combined = format!("{} {} {}", input.headline, input.description, input.cta);
    let power = count_power_words(&combined);

    let emotional = {
        let mut raw = 50.0f32;
        #[allow(clippy::cast_precision_loss)]
        {
            raw += 8.0 * power.min(6) as f32;
        }
        if lexicon::contains_any(&combined, lexicon::EMOTIONAL_WORDS) {
            raw += 12.0;
        }
        if combined.contains('!') {
            raw += 6.0;
        }
        raw.clamp(0.0, 100.0)
    };

    let cta_strength = if lexicon::contains_any(&input.cta, lexicon::STRONG_CTA_WORDS) {
        85.0
    } else if input.cta.trim().is_empty() {
        30.0
    } else {
        60.0
    };

    #[allow(clippy::cast_possible_truncation)]
    CopyFeatures {
        headline_length: input.headline.chars().count() as u32,
        headline_word_count: input.headline.split_whitespace().count() as u32,
        description_length: input.description.chars().count() as u32,
        avg_word_length: average_word_length(&combined),
        readability: estimate_readability(&combined),
        power_word_count: power as u32,
        emotional_score: emotional,
        cta_length: input.cta.trim().chars().count() as u32,
        cta_visibility: estimate_cta_visibility(&input.cta),
        cta_strength,
        has_digits: combined.chars().any(|c| c.is_ascii_digit()),
        has_urgency: lexicon::contains_any(&combined, lexicon::URGENCY_WORDS),
        question_hook: input.headline.contains('?'),
    }
}

fn extract_design(input: &PerformanceInput) -> DesignFeatures {
    let desc_len = input.description.chars().count();
    // Density is best in the 40–160 char band; tails taper off.
    let text_density = if (40..=160).contains(&desc_len) {
        80.0
    } else if desc_len < 40 {
        60.0
    } else {
        50.0
    };

    let cta_prominence =
        (estimate_cta_visibility(&input.cta) + if input.visual.has_image { 10.0 } else { 0.0 })
            .min(100.0);

    DesignFeatures {
        layout_balance: if input.visual.has_image { 75.0 } else { 60.0 },
        text_density,
        cta_prominence,
        brand_consistency: if input.visual.brand_colors_consistent {
            90.0
        } else {
            60.0
        },
        color_contrast: if input.visual.has_image { 70.0 } else { 55.0 },
        mobile_readability: if average_word_length(&input.headline) < 7.0 {
            80.0
        } else {
            60.0
        },
    }
}

fn extract_context(input: &PerformanceInput) -> ContextFeatures {
    let benchmark = lookup_benchmark(input.industry.as_deref());
    let tone_energy = match input.tone {
        Tone::Urgent | Tone::Bold => 85.0,
        Tone::Playful => 75.0,
        Tone::Friendly => 65.0,
        Tone::Professional => 50.0,
        Tone::Luxury => 40.0,
    };
    ContextFeatures {
        industry: benchmark.industry.to_string(),
        base_ctr: benchmark.avg_ctr,
        top_decile_ctr: benchmark.top_10_percent,
        tone_energy,
    }
}

fn average_word_length(text: &str) -> f32 {
    let mut chars = 0usize;
    let mut count = 0usize;
    for word in text.split_whitespace() {
        chars += word.chars().filter(|c| c.is_alphanumeric()).count();
        count += 1;
    }
    if count == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    {
        chars as f32 / count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cta_visibility_buckets() {
        // 15 and 20 are the bucket boundaries; one length on each side.
        assert_eq!(estimate_cta_visibility("Shop now!!"), 90.0); // 10 chars
        assert_eq!(estimate_cta_visibility("a".repeat(15).as_str()), 90.0);
        assert_eq!(estimate_cta_visibility("a".repeat(16).as_str()), 80.0);
        assert_eq!(estimate_cta_visibility("a".repeat(20).as_str()), 80.0);
        assert_eq!(estimate_cta_visibility("a".repeat(21).as_str()), 70.0);
        assert_eq!(estimate_cta_visibility("Claim your free trial ride"), 70.0); // 26 chars
        assert_eq!(estimate_cta_visibility(""), 40.0);
    }

    #[test]
    fn readability_is_bounded() {
        assert_eq!(estimate_readability(""), 50.0);
        let simple = estimate_readability("The cat sat. The dog ran. We all won.");
        let dense = estimate_readability(
            "Unquestionably, interdisciplinary organizational restructuring necessitates \
             comprehensive stakeholder realignment initiatives",
        );
        assert!(simple > dense);
        assert!((0.0..=100.0).contains(&simple));
        assert!((0.0..=100.0).contains(&dense));
    }

    #[test]
    fn syllable_estimate_floors_at_one() {
        assert_eq!(estimate_syllables("rhythm"), 1);
        assert_eq!(estimate_syllables("banana"), 3);
    }

    #[test]
    fn visual_flags_move_visual_features() {
        let bare = extract_visual(&VisualFlags::default());
        let rich = extract_visual(&VisualFlags {
            has_image: true,
            has_human_face: true,
            has_product_shot: true,
            has_logo: true,
            brand_colors_consistent: true,
        });
        assert!(rich.average() > bare.average());
        assert_eq!(rich.human_presence, 85.0);
        assert_eq!(bare.logo_visibility, 30.0);
    }

    #[test]
    fn urgency_and_digits_detected() {
        let input = PerformanceInput {
            headline: "Last chance: 50% off".to_string(),
            description: "Offer ends soon on every desk".to_string(),
            cta: "Shop now".to_string(),
            industry: None,
            tone: adgen_core::Tone::Urgent,
            visual: VisualFlags::default(),
        };
        let copy = extract_copy(&input);
        assert!(copy.has_digits);
        assert!(copy.has_urgency);
        assert!(!copy.question_hook);
    }
}
