//! Variant ranking.
//!
//! The default ordering — total score descending, ties broken by the fixed
//! [`HookAngle`] order — is the base case the determinism tests pin down.
//! Callers that want to fold in a performance signal supply their own
//! [`Comparator`]; the sort itself is always stable.

use std::cmp::Ordering;

use crate::variant::CopyVariant;

/// Pluggable variant comparator.
pub type Comparator = fn(&CopyVariant, &CopyVariant) -> Ordering;

/// Default comparator: total score descending, then hook-angle order.
#[must_use]
pub fn by_total_desc(a: &CopyVariant, b: &CopyVariant) -> Ordering {
    b.scores
        .total
        .cmp(&a.scores.total)
        .then_with(|| a.angle.cmp(&b.angle))
}

/// Stable-sorts `variants` with the given comparator.
#[must_use]
pub fn rank(mut variants: Vec<CopyVariant>, comparator: Comparator) -> Vec<CopyVariant> {
    variants.sort_by(comparator);
    variants
}

/// Stable-sorts `variants` with the default comparator.
#[must_use]
pub fn rank_default(variants: Vec<CopyVariant>) -> Vec<CopyVariant> {
    rank(variants, by_total_desc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{HookAngle, VariantScores};
    use uuid::Uuid;

    fn variant(angle: HookAngle, total: u8) -> CopyVariant {
        CopyVariant {
            id: Uuid::new_v4(),
            angle,
            headline: "h".to_string(),
            subheadline: "s".to_string(),
            description: "d".to_string(),
            cta: "c".to_string(),
            scores: VariantScores {
                emotional: total,
                clarity: total,
                persuasion: total,
                total,
            },
            power_words: Vec::new(),
        }
    }

    #[test]
    fn ranks_by_total_descending() {
        let ranked = rank_default(vec![
            variant(HookAngle::Scarcity, 40),
            variant(HookAngle::SocialProof, 90),
            variant(HookAngle::DreamOutcome, 70),
        ]);
        let totals: Vec<u8> = ranked.iter().map(|v| v.scores.total).collect();
        assert_eq!(totals, vec![90, 70, 40]);
    }

    #[test]
    fn ties_break_by_angle_order() {
        let ranked = rank_default(vec![
            variant(HookAngle::DreamOutcome, 80),
            variant(HookAngle::ProblemAgitate, 80),
            variant(HookAngle::Scarcity, 80),
        ]);
        let angles: Vec<HookAngle> = ranked.iter().map(|v| v.angle).collect();
        assert_eq!(
            angles,
            vec![
                HookAngle::ProblemAgitate,
                HookAngle::Scarcity,
                HookAngle::DreamOutcome
            ]
        );
    }

    #[test]
    fn repeated_calls_produce_identical_order() {
        let input = vec![
            variant(HookAngle::CuriosityGap, 77),
            variant(HookAngle::ProblemAgitate, 77),
            variant(HookAngle::Scarcity, 91),
            variant(HookAngle::SocialProof, 60),
            variant(HookAngle::DreamOutcome, 77),
        ];
        let first = rank_default(input.clone());
        let second = rank_default(input);
        let a: Vec<(HookAngle, u8)> = first.iter().map(|v| (v.angle, v.scores.total)).collect();
        let b: Vec<(HookAngle, u8)> = second.iter().map(|v| (v.angle, v.scores.total)).collect();
        assert_eq!(a, b);
    }
}
