//! Word lists for keyword extraction and sentiment scoring
//!
//! All lists are lower-case and built lazily on first use.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Stopwords that delimit candidate keyword phrases
pub struct Stopwords;

impl Stopwords {
    pub fn english() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
            [
                "a", "about", "above", "after", "again", "against", "all", "am", "an", "and",
                "any", "are", "aren't", "as", "at", "be", "because", "been", "before", "being",
                "below", "between", "both", "but", "by", "can", "can't", "cannot", "could",
                "couldn't", "did", "didn't", "do", "does", "doesn't", "doing", "don't", "down",
                "during", "each", "few", "for", "from", "further", "had", "hadn't", "hardly",
                "has", "hasn't", "have", "haven't", "having", "he", "her", "here", "hers",
                "herself", "him", "himself", "his", "how", "i", "i'd", "i'll", "i'm", "i've", "if",
                "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "let's", "me",
                "more", "most", "my", "myself", "never", "no", "nor", "not", "now", "of", "off",
                "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over",
                "own", "same", "she", "should", "shouldn't", "so", "some", "such", "than", "that",
                "that's", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
                "they", "they're", "this", "those", "through", "to", "too", "under", "until", "up",
                "very", "was", "wasn't", "we", "we're", "were", "weren't", "what", "when", "where",
                "which", "while", "who", "whom", "why", "will", "with", "won't", "without",
                "would", "wouldn't", "you", "you're", "your", "yours", "yourself", "yourselves",
            ]
            .iter()
            .copied()
            .collect()
        });
        &SET
    }
}

/// Prior polarity of opinion words, in [-1, 1]
pub struct PolarityLexicon;

impl PolarityLexicon {
    pub fn words() -> &'static HashMap<&'static str, f64> {
        static MAP: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
            [
                // positive
                ("amazing", 0.6),
                ("awesome", 1.0),
                ("beautiful", 0.85),
                ("best", 1.0),
                ("better", 0.5),
                ("brilliant", 0.9),
                ("calm", 0.3),
                ("celebrate", 0.6),
                ("confident", 0.5),
                ("delighted", 0.8),
                ("enjoy", 0.4),
                ("enjoyed", 0.4),
                ("excellent", 1.0),
                ("excited", 0.4),
                ("exciting", 0.3),
                ("fantastic", 0.4),
                ("fun", 0.3),
                ("glad", 0.5),
                ("good", 0.7),
                ("grateful", 0.6),
                ("great", 0.8),
                ("happy", 0.8),
                ("helpful", 0.5),
                ("hope", 0.3),
                ("hopeful", 0.5),
                ("impressive", 1.0),
                ("inspired", 0.6),
                ("joy", 0.8),
                ("kind", 0.6),
                ("love", 0.5),
                ("loved", 0.7),
                ("lovely", 0.5),
                ("lucky", 0.4),
                ("nice", 0.6),
                ("optimistic", 0.6),
                ("peaceful", 0.5),
                ("perfect", 1.0),
                ("pleased", 0.5),
                ("positive", 0.23),
                ("proud", 0.8),
                ("relieved", 0.5),
                ("rewarding", 0.6),
                ("satisfied", 0.5),
                ("success", 0.6),
                ("successful", 0.75),
                ("supportive", 0.5),
                ("thrilled", 0.8),
                ("wonderful", 1.0),
                // negative
                ("afraid", -0.6),
                ("angry", -0.5),
                ("annoyed", -0.4),
                ("anxious", -0.5),
                ("awful", -1.0),
                ("bad", -0.7),
                ("bitter", -0.5),
                ("boring", -1.0),
                ("broke", -0.4),
                ("confused", -0.4),
                ("depressed", -0.8),
                ("difficult", -0.5),
                ("disappointed", -0.75),
                ("disappointing", -0.6),
                ("disaster", -0.8),
                ("dread", -0.6),
                ("exhausted", -0.5),
                ("fail", -0.5),
                ("failed", -0.5),
                ("failure", -0.6),
                ("fear", -0.5),
                ("frustrated", -0.7),
                ("guilty", -0.5),
                ("hard", -0.3),
                ("hate", -0.8),
                ("hated", -0.9),
                ("hopeless", -0.8),
                ("horrible", -1.0),
                ("hurt", -0.5),
                ("lonely", -0.5),
                ("lost", -0.3),
                ("miserable", -1.0),
                ("nervous", -0.4),
                ("overwhelmed", -0.5),
                ("painful", -0.7),
                ("poor", -0.4),
                ("regret", -0.6),
                ("sad", -0.5),
                ("scared", -0.6),
                ("stressed", -0.6),
                ("stressful", -0.6),
                ("stuck", -0.4),
                ("terrible", -1.0),
                ("tired", -0.4),
                ("toxic", -0.8),
                ("unfair", -0.6),
                ("unhappy", -0.6),
                ("upset", -0.6),
                ("worried", -0.5),
                ("worse", -0.6),
                ("worst", -1.0),
                ("wrong", -0.5),
            ]
            .iter()
            .copied()
            .collect()
        });
        &MAP
    }

    /// Prior polarity of a lower-case word, if it carries any
    pub fn polarity(word: &str) -> Option<f64> {
        Self::words().get(word).copied()
    }
}

/// Words that scale the next opinion word
pub struct Intensifiers;

impl Intensifiers {
    pub fn words() -> &'static HashMap<&'static str, f64> {
        static MAP: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
            [
                ("absolutely", 1.5),
                ("extremely", 1.6),
                ("incredibly", 1.5),
                ("really", 1.3),
                ("so", 1.3),
                ("totally", 1.4),
                ("truly", 1.3),
                ("very", 1.3),
                ("quite", 1.1),
                ("somewhat", 0.7),
                ("slightly", 0.5),
                ("barely", 0.4),
            ]
            .iter()
            .copied()
            .collect()
        });
        &MAP
    }

    pub fn factor(word: &str) -> Option<f64> {
        Self::words().get(word).copied()
    }
}

/// Words that flip the next opinion word
pub struct Negators;

impl Negators {
    pub fn words() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> = Lazy::new(|| {
            [
                "not", "no", "never", "nor", "hardly", "without", "don't", "doesn't", "didn't",
                "isn't", "wasn't", "aren't", "weren't", "can't", "cannot", "couldn't", "won't",
                "wouldn't", "shouldn't", "haven't", "hasn't", "hadn't",
            ]
            .iter()
            .copied()
            .collect()
        });
        &SET
    }

    pub fn contains(word: &str) -> bool {
        Self::words().contains(word)
    }
}

/// A token of journal text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Run of letters, digits and inner apostrophes
    Word(&'a str),
    /// Any other non-whitespace character
    Punct(char),
}

/// Lower-case a word and fold typographic apostrophes
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase().replace('’', "'")
}

/// Split text into word and punctuation tokens
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)*|[^\s\p{L}\p{N}]")
            .expect("Valid token regex")
    });

    PATTERN
        .find_iter(text)
        .map(|m| {
            let s = m.as_str();
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if !c.is_alphanumeric() => Token::Punct(c),
                _ => Token::Word(s),
            }
        })
        .collect()
}
