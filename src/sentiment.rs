use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static LEXICON: Lazy<HashMap<String, f32>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, f32>>(raw).expect("valid sentiment lexicon")
});

/// Normalization constant for the compound score (`sum / sqrt(sum^2 + ALPHA)`).
const ALPHA: f32 = 15.0;

/// Valence increment contributed by an intensifier directly before a scored word.
const BOOST: f32 = 0.293;

/// Polarity scores for one piece of text.
///
/// `positive`, `neutral` and `negative` are proportions in `[0, 1]` that sum
/// to 1; `compound` is an independent normalized intensity in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub positive: f32,
    pub neutral: f32,
    pub negative: f32,
    pub compound: f32,
}

impl SentimentScore {
    /// The default for empty or fully unscoreable text.
    pub fn neutral() -> Self {
        Self {
            positive: 0.0,
            neutral: 1.0,
            negative: 0.0,
            compound: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Lexicon valence for a word (0 when the word is unknown).
    #[inline]
    fn word_valence(&self, w: &str) -> f32 {
        *LEXICON.get(w).unwrap_or(&0.0)
    }

    /// Score a text. Never fails; text with no scoreable tokens comes back
    /// as the neutral default.
    ///
    /// Negation: a negator within the preceding 1..=3 tokens inverts a
    /// word's valence. Intensifiers within the preceding 1..=2 tokens push
    /// the valence further in its own direction.
    pub fn polarity_scores(&self, text: &str) -> SentimentScore {
        // Collect tokens into a vector because negation and boosting look
        // back at earlier positions.
        let tokens: Vec<String> = tokenize(text).collect();
        if tokens.is_empty() {
            return SentimentScore::neutral();
        }

        let mut sum = 0.0_f32;
        let mut pos_sum = 0.0_f32;
        let mut neg_sum = 0.0_f32;
        let mut neu_count = 0usize;

        for i in 0..tokens.len() {
            let w = tokens[i].as_str();
            let base = self.word_valence(w);
            if base == 0.0 {
                neu_count += 1;
                continue;
            }

            let mut v = base;

            let boosted = (1..=2)
                .filter(|k| i >= *k && is_intensifier(tokens[i - k].as_str()))
                .count() as f32;
            v += BOOST * boosted * v.signum();

            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            if negated {
                v = -v;
            }

            sum += v;
            if v > 0.0 {
                // VADER-style proportioning: each hit also counts itself.
                pos_sum += v + 1.0;
            } else {
                neg_sum += -v + 1.0;
            }
        }

        let total = pos_sum + neg_sum + neu_count as f32;
        if total == 0.0 {
            return SentimentScore::neutral();
        }

        let compound = (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0);
        SentimentScore {
            positive: pos_sum / total,
            neutral: neu_count as f32 / total,
            negative: neg_sum / total,
            compound,
        }
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Alphanumeric tokens, lower-cased.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "cannot"
            | "without"
            // tokenization splits contractions: "isn't" -> "isn", "t"
            | "isn"
            | "wasn"
            | "aren"
            | "won"
            | "don"
            | "doesn"
            | "didn"
            | "couldn"
    )
}

fn is_intensifier(tok: &str) -> bool {
    matches!(
        tok,
        "very" | "extremely" | "strongly" | "sharply" | "hugely" | "deeply" | "really"
    )
}
