//! Domain taxonomy and value-tension rules
//!
//! Built once at startup (built-in defaults or a TOML override) and then
//! shared read-only through `Arc<Taxonomy>`.

use crate::error::{PonderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Scores at or above this on both sides of a pair count as a conflict
pub const DEFAULT_CONFLICT_THRESHOLD: i64 = 8;

/// Change between consecutive check-ins that counts as a rapid swing
pub const DEFAULT_RAPID_CHANGE_THRESHOLD: i64 = 5;

/// A life-area label and the keywords that trigger it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRule {
    pub name: String,
    pub keywords: Vec<String>,
}

impl DomainRule {
    fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Two values considered antagonistic when both score highly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictPair {
    pub first: String,
    pub second: String,
}

impl ConflictPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

/// Immutable classification and tension configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Domains in classification order
    pub domains: Vec<DomainRule>,

    /// Conflict pairs in reporting order
    pub conflict_pairs: Vec<ConflictPair>,

    #[serde(default = "default_conflict_threshold")]
    pub conflict_threshold: i64,

    #[serde(default = "default_rapid_change_threshold")]
    pub rapid_change_threshold: i64,
}

fn default_conflict_threshold() -> i64 {
    DEFAULT_CONFLICT_THRESHOLD
}

fn default_rapid_change_threshold() -> i64 {
    DEFAULT_RAPID_CHANGE_THRESHOLD
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            domains: vec![
                DomainRule::new(
                    "career",
                    &[
                        "job", "work", "promotion", "boss", "colleague", "career", "raise",
                        "employer", "employee", "office",
                    ],
                ),
                DomainRule::new(
                    "health",
                    &[
                        "health", "doctor", "illness", "exercise", "diet", "wellness",
                        "nutrition", "fitness", "weight", "gym", "medication", "treatment",
                    ],
                ),
                DomainRule::new(
                    "relationships",
                    &[
                        "family", "friend", "partner", "relationship", "love", "marriage",
                        "spouse", "parent", "child", "children", "dating",
                    ],
                ),
                DomainRule::new(
                    "finance",
                    &[
                        "money", "finance", "debt", "salary", "investment", "budget", "stock",
                        "market", "invest", "save", "savings", "bank", "fund", "income",
                        "expense", "spending", "profit", "loss",
                    ],
                ),
                DomainRule::new(
                    "personal_growth",
                    &[
                        "growth", "learning", "course", "skill", "habit", "self", "improve",
                        "improvement", "goal", "achievement", "progress", "development",
                    ],
                ),
            ],
            conflict_pairs: vec![
                ConflictPair::new("Courage", "Caution"),
                ConflictPair::new("Honesty", "Diplomacy"),
                ConflictPair::new("Empathy", "Detachment"),
            ],
            conflict_threshold: DEFAULT_CONFLICT_THRESHOLD,
            rapid_change_threshold: DEFAULT_RAPID_CHANGE_THRESHOLD,
        }
    }
}

impl Taxonomy {
    /// Load a taxonomy from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading taxonomy from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load a taxonomy from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let taxonomy: Taxonomy =
            toml::from_str(toml_str).map_err(|e| PonderError::Taxonomy(e.to_string()))?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for domain in &self.domains {
            if domain.name.trim().is_empty() {
                return Err(PonderError::Taxonomy("domain name cannot be empty".to_string()));
            }
            if !names.insert(domain.name.as_str()) {
                return Err(PonderError::Taxonomy(format!(
                    "duplicate domain '{}'",
                    domain.name
                )));
            }
            if domain.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(PonderError::Taxonomy(format!(
                    "{}: keywords cannot be empty",
                    domain.name
                )));
            }
        }

        for pair in &self.conflict_pairs {
            if pair.first.trim().is_empty() || pair.second.trim().is_empty() {
                return Err(PonderError::Taxonomy(
                    "conflict pair values cannot be empty".to_string(),
                ));
            }
        }

        if self.conflict_threshold <= 0 {
            return Err(PonderError::Taxonomy(
                "conflict_threshold must be positive".to_string(),
            ));
        }

        if self.rapid_change_threshold <= 0 {
            return Err(PonderError::Taxonomy(
                "rapid_change_threshold must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Domain names in classification order
    pub fn domain_names(&self) -> Vec<&str> {
        self.domains.iter().map(|d| d.name.as_str()).collect()
    }

    /// True if `name` is one of the configured domains
    pub fn has_domain(&self, name: &str) -> bool {
        self.domains.iter().any(|d| d.name == name)
    }
}
