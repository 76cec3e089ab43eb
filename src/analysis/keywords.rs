//! Keyword extraction
//!
//! Rapid automatic keyword extraction: stopwords and punctuation split the
//! text into candidate phrases, each word is scored by degree over frequency
//! in the co-occurrence graph, and a phrase scores the sum of its words.

use super::lexicon::{normalize_word, tokenize, Stopwords, Token};
use std::collections::{HashMap, HashSet};

/// Number of phrases returned by default
pub const DEFAULT_KEYWORD_LIMIT: usize = 5;

/// Extracts the most salient phrases from free text
#[derive(Debug, Clone, Copy)]
pub struct KeywordExtractor {
    limit: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self {
            limit: DEFAULT_KEYWORD_LIMIT,
        }
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor returning at most `limit` phrases
    pub fn with_limit(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Top ranked phrases, most salient first, lower-cased
    pub fn extract(&self, text: &str) -> Vec<String> {
        let phrases = candidate_phrases(text);
        if phrases.is_empty() {
            return Vec::new();
        }

        let word_scores = word_scores(&phrases);

        // First occurrence order is the tie-break, so scoring is deterministic
        let mut ranked: Vec<(f64, usize, String)> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for phrase in &phrases {
            let text = phrase.join(" ");
            if !seen.insert(text.clone()) {
                continue;
            }
            let score: f64 = phrase.iter().map(|w| word_scores[w.as_str()]).sum();
            ranked.push((score, ranked.len(), text));
        }

        ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        ranked
            .into_iter()
            .take(self.limit)
            .map(|(_, _, text)| text)
            .collect()
    }
}

/// Runs of non-stopwords between stopwords and punctuation
fn candidate_phrases(text: &str) -> Vec<Vec<String>> {
    let stopwords = Stopwords::english();
    let mut phrases = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for token in tokenize(text) {
        match token {
            Token::Word(word) => {
                let word = normalize_word(word);
                if stopwords.contains(word.as_str()) {
                    if !current.is_empty() {
                        phrases.push(std::mem::take(&mut current));
                    }
                } else {
                    current.push(word);
                }
            }
            Token::Punct(_) => {
                if !current.is_empty() {
                    phrases.push(std::mem::take(&mut current));
                }
            }
        }
    }

    if !current.is_empty() {
        phrases.push(current);
    }

    phrases
}

/// Degree-to-frequency ratio for every word appearing in a phrase
fn word_scores(phrases: &[Vec<String>]) -> HashMap<&str, f64> {
    let mut frequency: HashMap<&str, usize> = HashMap::new();
    let mut degree: HashMap<&str, usize> = HashMap::new();

    for phrase in phrases {
        for word in phrase {
            *frequency.entry(word.as_str()).or_insert(0) += 1;
            // A word co-occurs with every word of its phrase, itself included
            *degree.entry(word.as_str()).or_insert(0) += phrase.len();
        }
    }

    frequency
        .into_iter()
        .map(|(word, freq)| (word, degree[word] as f64 / freq as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let extractor = KeywordExtractor::new();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("   ").is_empty());
        assert!(extractor.extract("the and of, to!").is_empty());
    }

    #[test]
    fn test_longer_phrases_rank_first() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("Accept the remote software engineering offer or stay.");
        assert_eq!(keywords[0], "remote software engineering offer");
        assert_eq!(&keywords[1..], &["accept".to_string(), "stay".to_string()]);
    }

    #[test]
    fn test_phrase_scoring_order() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("Career change anxiety. Career coach.");
        // career: degree 5, freq 2 -> 2.5; change/anxiety 3.0; coach 2.0
        assert_eq!(
            keywords,
            vec!["career change anxiety".to_string(), "career coach".to_string()]
        );
    }

    #[test]
    fn test_limit_and_dedup() {
        let text = "alpha, beta, gamma, delta, epsilon, zeta, eta, alpha";
        let keywords = KeywordExtractor::new().extract(text);
        assert_eq!(keywords.len(), 5);
        assert_eq!(keywords[0], "alpha");
        assert_eq!(keywords.iter().filter(|k| *k == "alpha").count(), 1);

        let keywords = KeywordExtractor::with_limit(2).extract(text);
        assert_eq!(keywords.len(), 2);
    }
}
