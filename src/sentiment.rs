use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

use crate::models::SentimentLabel;

/// Thresholds for turning a polarity into a label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentPolicy {
    /// Polarity must exceed `epsilon` in magnitude to leave Neutral.
    pub epsilon: f64,
    /// Fold Negative into Neutral (binary Positive/Neutral labelling).
    pub merge_negative: bool,
}

impl Default for SentimentPolicy {
    fn default() -> Self {
        Self {
            epsilon: 0.0,
            merge_negative: false,
        }
    }
}

impl SentimentPolicy {
    pub fn binary() -> Self {
        Self {
            epsilon: 0.0,
            merge_negative: true,
        }
    }

    pub fn classify(&self, polarity: f64) -> SentimentLabel {
        if polarity > self.epsilon {
            SentimentLabel::Positive
        } else if polarity < -self.epsilon && !self.merge_negative {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

const INTENSIFY: f64 = 1.3;
const NEGATE: f64 = -0.5;
const NEGATION_WINDOW: usize = 2;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9]+(?:'[a-z]+)?").unwrap());

static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let entries: &[(&str, f64)] = &[
        // positive
        ("good", 0.7), ("great", 0.8), ("best", 1.0), ("better", 0.5), ("amazing", 0.6),
        ("awesome", 1.0), ("excellent", 1.0), ("perfect", 1.0), ("love", 0.5), ("loved", 0.7),
        ("beautiful", 0.85), ("happy", 0.8), ("fun", 0.3), ("funny", 0.25), ("easy", 0.43),
        ("simple", 0.2), ("free", 0.4), ("new", 0.14), ("top", 0.5), ("incredible", 0.9),
        ("epic", 0.6), ("wonderful", 1.0), ("brilliant", 0.9), ("fantastic", 0.4), ("cool", 0.35),
        ("nice", 0.6), ("win", 0.8), ("winning", 0.5), ("success", 0.3), ("successful", 0.75),
        ("insane", 0.3), ("powerful", 0.3), ("fast", 0.2), ("ultimate", 0.5), ("delicious", 1.0),
        ("gorgeous", 0.7), ("hilarious", 0.5), ("legendary", 0.6), ("relaxing", 0.4), ("calm", 0.3),
        ("helpful", 0.5), ("smart", 0.2), ("rich", 0.375), ("proud", 0.8), ("exciting", 0.3),
        ("satisfying", 0.5), ("wholesome", 0.6), ("magic", 0.5), ("genius", 0.6), ("favorite", 0.5),
        // negative
        ("bad", -0.7), ("worst", -1.0), ("worse", -0.4), ("terrible", -1.0), ("awful", -1.0),
        ("horrible", -1.0), ("hate", -0.8), ("sad", -0.5), ("angry", -0.5), ("ugly", -0.7),
        ("boring", -1.0), ("stupid", -0.8), ("dumb", -0.4), ("fail", -0.5), ("failed", -0.5),
        ("failure", -0.3), ("wrong", -0.5), ("scary", -0.5), ("dangerous", -0.6), ("poor", -0.4),
        ("broke", -0.4), ("broken", -0.4), ("lost", -0.3), ("crazy", -0.6),
        ("disaster", -0.8), ("fake", -0.5), ("scam", -0.8), ("dead", -0.2), ("death", -0.4),
        ("problem", -0.3), ("mistake", -0.5), ("mistakes", -0.5), ("painful", -0.7), ("toxic", -0.6),
        ("nightmare", -0.7), ("cringe", -0.6), ("useless", -0.5), ("waste", -0.2),
        ("shocking", -0.5), ("tragic", -0.8), ("disappointing", -0.6), ("annoying", -0.8), ("hard", -0.3),
    ];
    entries.iter().copied().collect()
});

static INTENSIFIERS: &[&str] = &[
    "very", "really", "so", "super", "extremely", "incredibly", "totally", "absolutely", "most",
];

static NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "wasn't", "aren't", "can't",
    "won't", "cannot", "without",
];

fn tokenize(text: &str) -> Vec<String> {
    let folded = text
        .nfc()
        .collect::<String>()
        .to_lowercase()
        .replace(['’', '‘'], "'");
    TOKEN_RE
        .find_iter(&folded)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Lexicon polarity of `text` in [-1.0, 1.0]; 0.0 when no opinion word occurs.
pub fn polarity(text: &str) -> f64 {
    let tokens = tokenize(text);
    let mut scores = Vec::new();

    for (i, tok) in tokens.iter().enumerate() {
        let Some(&base) = LEXICON.get(tok.as_str()) else {
            continue;
        };
        let mut s = base;
        if i > 0 && INTENSIFIERS.contains(&tokens[i - 1].as_str()) {
            s *= INTENSIFY;
        }
        let window_start = i.saturating_sub(NEGATION_WINDOW);
        if tokens[window_start..i]
            .iter()
            .any(|t| NEGATORS.contains(&t.as_str()))
        {
            s *= NEGATE;
        }
        scores.push(s.clamp(-1.0, 1.0));
    }

    if scores.is_empty() {
        return 0.0;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    mean.clamp(-1.0, 1.0)
}
