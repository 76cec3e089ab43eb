//! Core data types for the Ponder analysis core
//!
//! Journal entries and value check-ins are owned by the surrounding service;
//! this module only models the fields the analysis reads and writes, plus the
//! fixed-shape tag record produced by tagging.

use crate::error::{PonderError, Result, TaggingError};
use crate::services::tagging::TaggingStrategy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Key inside a stored snapshot that holds a timestamp rather than a value
const TIMESTAMP_KEY: &str = "created_at";

/// Unique identifier for journal entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Create a new random entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an entry ID from a string
    pub fn from_string(s: &str) -> std::result::Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse three-way polarity of journal text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentTag {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl SentimentTag {
    /// Literal persisted on the entry record
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentTag::Positive => "positive",
            SentimentTag::Neutral => "neutral",
            SentimentTag::Negative => "negative",
        }
    }

    /// All literals, in schema order
    pub fn literals() -> [&'static str; 3] {
        ["positive", "neutral", "negative"]
    }
}

impl fmt::Display for SentimentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentTag {
    type Err = PonderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "positive" => Ok(SentimentTag::Positive),
            "neutral" => Ok(SentimentTag::Neutral),
            "negative" => Ok(SentimentTag::Negative),
            other => Err(PonderError::Other(format!(
                "Unknown sentiment tag: '{}'",
                other
            ))),
        }
    }
}

/// Tags derived from one `(title, context)` pair
///
/// The three fields are always produced and applied together.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryTags {
    /// Life-area labels from the taxonomy; may be empty
    pub domain_tags: BTreeSet<String>,

    /// Overall polarity
    pub sentiment_tag: SentimentTag,

    /// Ranked key phrases, most salient first
    pub keywords: Vec<String>,
}

/// A decision journal entry as seen by the analysis core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub user_id: Uuid,
    pub title: String,
    pub context: Option<String>,
    pub anticipated_outcomes: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,

    #[serde(default)]
    pub domain_tags: BTreeSet<String>,
    pub sentiment_tag: Option<SentimentTag>,
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Deprecated single-domain field, kept for old records
    pub domain: Option<String>,
    /// Deprecated single-sentiment field, kept for old records
    pub sentiment: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Create an untagged entry
    pub fn new(user_id: Uuid, title: impl Into<String>, context: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: EntryId::new(),
            user_id,
            title: title.into(),
            context,
            anticipated_outcomes: None,
            values: Vec::new(),
            domain_tags: BTreeSet::new(),
            sentiment_tag: None,
            keywords: Vec::new(),
            domain: None,
            sentiment: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite all derived fields at once
    pub fn apply_tags(&mut self, tags: EntryTags) {
        self.domain_tags = tags.domain_tags;
        self.sentiment_tag = Some(tags.sentiment_tag);
        self.keywords = tags.keywords;
        self.updated_at = Utc::now();
    }

    /// Current derived fields, if the entry has been tagged
    pub fn tags(&self) -> Option<EntryTags> {
        self.sentiment_tag.map(|sentiment_tag| EntryTags {
            domain_tags: self.domain_tags.clone(),
            sentiment_tag,
            keywords: self.keywords.clone(),
        })
    }

    /// Re-derive tags from the current title and context.
    ///
    /// On failure the entry keeps its previous tags.
    pub async fn retag(
        &mut self,
        strategy: &dyn TaggingStrategy,
    ) -> std::result::Result<(), TaggingError> {
        let tags = strategy
            .tag_entry(Some(&self.title), self.context.as_deref())
            .await?;
        self.apply_tags(tags);
        Ok(())
    }
}

/// A user's self-rated scores on personal values at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueSnapshot(BTreeMap<String, i64>);

impl ValueSnapshot {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Parse the serialized form stored on a check-in row
    pub fn parse(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| PonderError::InvalidSnapshot(format!("not JSON: {}", e)))?;
        Self::from_json(&value)
    }

    /// Build from a JSON object, skipping the timestamp key
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            PonderError::InvalidSnapshot("expected an object of value scores".to_string())
        })?;

        let mut scores = BTreeMap::new();
        for (name, score) in object {
            if name == TIMESTAMP_KEY {
                continue;
            }
            let score = score.as_i64().ok_or_else(|| {
                PonderError::InvalidSnapshot(format!(
                    "score for '{}' is not an integer: {}",
                    name, score
                ))
            })?;
            scores.insert(name.clone(), score);
        }

        Ok(Self(scores))
    }

    pub fn insert(&mut self, name: impl Into<String>, score: i64) {
        self.0.insert(name.into(), score);
    }

    /// Score for a value, if recorded
    pub fn get(&self, name: &str) -> Option<i64> {
        self.0.get(name).copied()
    }

    /// Score for a value, treating a missing value as 0
    pub fn score_or_zero(&self, name: &str) -> i64 {
        self.get(name).unwrap_or(0)
    }

    /// Value names in this snapshot
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for ValueSnapshot {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// One value calibration check-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCheckin {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub value_snapshot: ValueSnapshot,
}

impl ValueCheckin {
    pub fn new(user_id: Uuid, created_at: DateTime<Utc>, value_snapshot: ValueSnapshot) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            created_at,
            value_snapshot,
        }
    }

    /// Rebuild a check-in from its stored row, where the snapshot is serialized
    pub fn from_stored(
        id: Uuid,
        user_id: Uuid,
        created_at: DateTime<Utc>,
        raw_snapshot: &str,
    ) -> Result<Self> {
        Ok(Self {
            id,
            user_id,
            created_at,
            value_snapshot: ValueSnapshot::parse(raw_snapshot)?,
        })
    }
}

/// Order check-ins oldest first
pub fn sort_history(history: &mut [ValueCheckin]) {
    history.sort_by_key(|c| c.created_at);
}

/// Parse an exported history into snapshots, oldest first.
///
/// `raw` is a JSON array whose items are either check-ins
/// (`{"created_at": ..., "value_snapshot": ...}`, snapshot as an object or a
/// serialized string) or bare snapshots. Check-ins are sorted by
/// `created_at`; bare snapshots keep file order. The two forms cannot be mixed.
pub fn parse_history(raw: &str) -> Result<Vec<ValueSnapshot>> {
    let items: Vec<serde_json::Value> = serde_json::from_str(raw)?;

    let is_checkin = |item: &serde_json::Value| item.get(CHECKIN_SNAPSHOT_KEY).is_some();
    let checkins = items.iter().filter(|item| is_checkin(item)).count();

    if checkins == 0 {
        return items.iter().map(ValueSnapshot::from_json).collect();
    }
    if checkins != items.len() {
        return Err(PonderError::InvalidSnapshot(
            "history mixes check-ins and bare snapshots".to_string(),
        ));
    }

    let mut history = items
        .iter()
        .map(checkin_from_json)
        .collect::<Result<Vec<_>>>()?;
    sort_history(&mut history);

    Ok(history.into_iter().map(|c| c.value_snapshot).collect())
}

const CHECKIN_SNAPSHOT_KEY: &str = "value_snapshot";

fn checkin_from_json(item: &serde_json::Value) -> Result<ValueCheckin> {
    let created_at = item
        .get(TIMESTAMP_KEY)
        .and_then(|v| v.as_str())
        .ok_or_else(|| PonderError::InvalidSnapshot("check-in without created_at".to_string()))?;
    let created_at = DateTime::parse_from_rfc3339(created_at)
        .map_err(|e| PonderError::InvalidSnapshot(format!("bad created_at '{}': {}", created_at, e)))?
        .with_timezone(&Utc);

    let value_snapshot = match &item[CHECKIN_SNAPSHOT_KEY] {
        serde_json::Value::String(raw) => ValueSnapshot::parse(raw)?,
        other => ValueSnapshot::from_json(other)?,
    };

    Ok(ValueCheckin::new(Uuid::nil(), created_at, value_snapshot))
}
