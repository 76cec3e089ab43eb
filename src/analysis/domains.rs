//! Rule-based domain classification
//!
//! A domain matches when any of its keywords occurs anywhere in the
//! lower-cased text. Matching is by substring, so short keywords can match
//! inside longer words ("save" in "saved", "self" in "itself").

use crate::taxonomy::Taxonomy;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Multi-label classifier over the taxonomy's domains
#[derive(Debug, Clone)]
pub struct DomainClassifier {
    taxonomy: Arc<Taxonomy>,
    lowered: Vec<(String, Vec<String>)>,
}

impl DomainClassifier {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        let lowered = taxonomy
            .domains
            .iter()
            .map(|d| {
                (
                    d.name.clone(),
                    d.keywords.iter().map(|k| k.to_lowercase()).collect(),
                )
            })
            .collect();

        Self { taxonomy, lowered }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Every domain with at least one keyword in `text`; empty if none match
    pub fn classify(&self, text: &str) -> BTreeSet<String> {
        if text.is_empty() {
            return BTreeSet::new();
        }

        let text = text.to_lowercase();
        self.lowered
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl Default for DomainClassifier {
    fn default() -> Self {
        Self::new(Arc::new(Taxonomy::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::DomainRule;

    #[test]
    fn test_single_domain() {
        let classifier = DomainClassifier::default();
        let domains = classifier.classify("My boss gave me a promotion");
        assert_eq!(domains, ["career".to_string()].into_iter().collect());
    }

    #[test]
    fn test_multi_label() {
        let classifier = DomainClassifier::default();
        let domains = classifier.classify("Should I take the JOB or stay near FAMILY and keep my savings?");
        assert!(domains.contains("career"));
        assert!(domains.contains("relationships"));
        assert!(domains.contains("finance"));
        assert!(!domains.contains("health"));
    }

    #[test]
    fn test_no_match_is_empty_set() {
        let classifier = DomainClassifier::default();
        assert!(classifier.classify("The weather is mild today").is_empty());
        assert!(classifier.classify("").is_empty());
    }

    #[test]
    fn test_substring_matching_is_kept() {
        let classifier = DomainClassifier::default();
        // "self" occurs inside "itself"
        let domains = classifier.classify("The decision made itself");
        assert!(domains.contains("personal_growth"));
    }

    #[test]
    fn test_custom_taxonomy_keywords_are_case_folded() {
        let taxonomy = Taxonomy {
            domains: vec![DomainRule {
                name: "creativity".to_string(),
                keywords: vec!["Paint".to_string()],
            }],
            ..Taxonomy::default()
        };
        let classifier = DomainClassifier::new(Arc::new(taxonomy));
        assert!(classifier.classify("painting again").contains("creativity"));
    }
}
