//! Local text analysis for journal entries
//!
//! Heuristic building blocks used by the local tagging strategy:
//! - Keyword extraction (co-occurrence ranking over non-stopword runs)
//! - Domain classification (taxonomy keyword membership)
//! - Sentiment scoring (polarity lexicon with fixed thresholds)

pub mod domains;
pub mod keywords;
pub mod lexicon;
pub mod sentiment;

pub use domains::DomainClassifier;
pub use keywords::{KeywordExtractor, DEFAULT_KEYWORD_LIMIT};
pub use sentiment::{tag_for_polarity, SentimentScorer, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
