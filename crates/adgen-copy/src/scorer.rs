//! Deterministic persuasive-quality scoring.
//!
//! Pure function of the variant's own text plus the brief's offer fact —
//! no sibling variants, no network, no randomness. Scores never leave
//! `[0, 100]` and the total is the rounded mean of the three parts.

use adgen_core::lexicon;
use adgen_core::VariantScores;

/// Borrowed view of one variant's copy fields.
#[derive(Debug, Clone, Copy)]
pub struct VariantText<'a> {
    pub headline: &'a str,
    pub subheadline: &'a str,
    pub description: &'a str,
    pub cta: &'a str,
}

impl VariantText<'_> {
    fn combined(&self) -> String {
        format!(
            "{} {} {} {}",
            self.headline, self.subheadline, self.description, self.cta
        )
    }
}

/// Scores one variant. `offer` is the brief's offer fact, if any; echoing
/// it verbatim in the description earns a persuasion bonus.
#[must_use]
pub fn score(text: &VariantText<'_>, offer: Option<&str>) -> VariantScores {
    let emotional = emotional_score(text);
    let clarity = clarity_score(text);
    let persuasion = persuasion_score(text, offer);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = (f32::from(emotional) + f32::from(clarity) + f32::from(persuasion)) / 3.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = total.round() as u8;

    VariantScores {
        emotional,
        clarity,
        persuasion,
        total,
    }
}

fn clamp_score(raw: i32) -> u8 {
    u8::try_from(raw.clamp(0, 100)).unwrap_or(0)
}

/// 50 base, +8 per power word, +10 for `!`, +8 for `?`, +12 for an
/// emotional-lexicon hit.
fn emotional_score(text: &VariantText<'_>) -> u8 {
    let combined = text.combined();
    let mut raw = 50i32;

    let power = i32::try_from(lexicon::count_power_words(&combined)).unwrap_or(i32::MAX / 8);
    raw += 8 * power;
    if combined.contains('!') {
        raw += 10;
    }
    if combined.contains('?') {
        raw += 8;
    }
    if lexicon::contains_any(&combined, lexicon::EMOTIONAL_WORDS) {
        raw += 12;
    }

    clamp_score(raw)
}

/// 70 base, −20 for a headline over 10 words, +10 at 6 words or fewer,
/// +10 when the average word length across the copy is under 6 chars.
fn clarity_score(text: &VariantText<'_>) -> u8 {
    let mut raw = 70i32;

    let headline_words = text.headline.split_whitespace().count();
    if headline_words > 10 {
        raw -= 20;
    }
    if headline_words <= 6 {
        raw += 10;
    }
    if average_word_length(&text.combined()) < 6.0 {
        raw += 10;
    }

    clamp_score(raw)
}

/// 60 base, +15 for a strong-CTA verb, +10 when the description echoes the
/// offer verbatim (case-insensitive), +10 when any digit appears.
fn persuasion_score(text: &VariantText<'_>, offer: Option<&str>) -> u8 {
    let mut raw = 60i32;

    if lexicon::contains_any(text.cta, lexicon::STRONG_CTA_WORDS) {
        raw += 15;
    }
    if let Some(offer) = offer {
        if !offer.is_empty()
            && text
                .description
                .to_lowercase()
                .contains(&offer.to_lowercase())
        {
            raw += 10;
        }
    }
    if text.combined().chars().any(|c| c.is_ascii_digit()) {
        raw += 10;
    }

    clamp_score(raw)
}

/// Mean alphanumeric length of the words in `text`; 0.0 for empty text.
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
