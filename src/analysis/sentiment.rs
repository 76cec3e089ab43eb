//! Lexicon-based sentiment scoring
//!
//! Polarity is the mean prior polarity of the opinion words in the text,
//! adjusted by a preceding intensifier or negator, then scaled by trailing
//! exclamation marks and clamped to [-1, 1].

use super::lexicon::{normalize_word, tokenize, Intensifiers, Negators, PolarityLexicon, Token};
use crate::types::SentimentTag;

/// Polarity above this is positive
pub const POSITIVE_THRESHOLD: f64 = 0.2;

/// Polarity below this is negative
pub const NEGATIVE_THRESHOLD: f64 = -0.2;

/// Negated opinion words are flipped and damped by this factor
const NEGATION_FACTOR: f64 = -0.5;

/// Each exclamation mark (up to three) amplifies polarity by this much
const EXCLAMATION_BOOST: f64 = 0.1;

/// Maps text to a three-way sentiment tag
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentScorer;

impl SentimentScorer {
    pub fn new() -> Self {
        Self
    }

    /// Polarity of `text` in [-1, 1]; 0.0 when no opinion words occur
    pub fn polarity(&self, text: &str) -> f64 {
        let mut scores: Vec<f64> = Vec::new();
        let mut multiplier = 1.0;
        let mut negated = false;
        let mut exclamations = 0usize;

        for token in tokenize(text) {
            match token {
                Token::Punct('!') => {
                    exclamations += 1;
                    multiplier = 1.0;
                    negated = false;
                }
                Token::Punct('\'') | Token::Punct('’') => {}
                Token::Punct(_) => {
                    multiplier = 1.0;
                    negated = false;
                }
                Token::Word(word) => {
                    let word = normalize_word(word);
                    if Negators::contains(&word) {
                        negated = true;
                    } else if let Some(factor) = Intensifiers::factor(&word) {
                        multiplier *= factor;
                    } else if let Some(prior) = PolarityLexicon::polarity(&word) {
                        let mut score = prior * multiplier;
                        if negated {
                            score *= NEGATION_FACTOR;
                        }
                        scores.push(score.clamp(-1.0, 1.0));
                        multiplier = 1.0;
                        negated = false;
                    } else {
                        // Intensifiers only reach the word right after them
                        multiplier = 1.0;
                    }
                }
            }
        }

        if scores.is_empty() {
            return 0.0;
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        let boost = 1.0 + EXCLAMATION_BOOST * exclamations.min(3) as f64;
        (mean * boost).clamp(-1.0, 1.0)
    }

    /// Tag with a wide neutral band: polarity in [-0.2, 0.2] is neutral
    pub fn score(&self, text: &str) -> SentimentTag {
        if text.trim().is_empty() {
            return SentimentTag::Neutral;
        }

        tag_for_polarity(self.polarity(text))
    }
}

/// Apply the fixed thresholds to a polarity value
pub fn tag_for_polarity(polarity: f64) -> SentimentTag {
    if polarity > POSITIVE_THRESHOLD {
        SentimentTag::Positive
    } else if polarity < NEGATIVE_THRESHOLD {
        SentimentTag::Negative
    } else {
        SentimentTag::Neutral
    }
}
