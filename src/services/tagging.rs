//! Journal entry tagging
//!
//! Two interchangeable strategies behind [`TaggingStrategy`]:
//! - [`LocalTagger`]: domain, sentiment and keyword heuristics; never fails
//! - [`RemoteTagger`]: one schema-constrained LLM call, validated strictly
//!
//! The remote strategy is fail-fast. It never substitutes default or local
//! tags; callers decide whether to retry, degrade, or report the error.

use crate::analysis::{DomainClassifier, KeywordExtractor, SentimentScorer};
use crate::config::{PonderConfig, TaggingMode};
use crate::error::{TaggingError, TaggingResult};
use crate::services::llm::{LlmService, StructuredRequest, TextGenerator};
use crate::taxonomy::Taxonomy;
use crate::types::{EntryTags, SentimentTag};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fewest keywords a remote response may carry
pub const REMOTE_MIN_KEYWORDS: usize = 3;

/// Most keywords a remote response may carry
pub const REMOTE_MAX_KEYWORDS: usize = 7;

const SCHEMA_NAME: &str = "entry_tags";

const SYSTEM_INSTRUCTION: &str = "You categorize decision journal entries. \
Assign every life domain the entry touches (possibly none), the overall sentiment, \
and 3 to 7 short keywords or key phrases ordered from most to least salient.";

/// Turns an entry's title and context into tags
#[async_trait]
pub trait TaggingStrategy: Send + Sync {
    /// Derive tags for one entry
    async fn tag_entry(&self, title: Option<&str>, context: Option<&str>)
        -> TaggingResult<EntryTags>;

    /// Short strategy name for logs
    fn name(&self) -> &'static str;

    /// `tag_entry` bounded by a deadline; elapsing counts as unavailable
    async fn tag_entry_with_timeout(
        &self,
        title: Option<&str>,
        context: Option<&str>,
        timeout: Duration,
    ) -> TaggingResult<EntryTags> {
        match tokio::time::timeout(timeout, self.tag_entry(title, context)).await {
            Ok(result) => result,
            Err(_) => Err(TaggingError::Unavailable(format!(
                "{} tagging timed out after {}ms",
                self.name(),
                timeout.as_millis()
            ))),
        }
    }
}

/// Title and context joined by a space, absent parts as empty strings
pub fn combined_text(title: Option<&str>, context: Option<&str>) -> String {
    format!("{} {}", title.unwrap_or(""), context.unwrap_or(""))
}

/// Heuristic tagging with no external dependency
#[derive(Debug, Clone)]
pub struct LocalTagger {
    classifier: DomainClassifier,
    scorer: SentimentScorer,
    extractor: KeywordExtractor,
}

impl LocalTagger {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            classifier: DomainClassifier::new(taxonomy),
            scorer: SentimentScorer::new(),
            extractor: KeywordExtractor::new(),
        }
    }

    /// Synchronous tagging for callers outside an async context
    pub fn tag(&self, title: Option<&str>, context: Option<&str>) -> EntryTags {
        let text = combined_text(title, context);
        EntryTags {
            domain_tags: self.classifier.classify(&text),
            sentiment_tag: self.scorer.score(&text),
            keywords: self.extractor.extract(&text),
        }
    }
}

impl Default for LocalTagger {
    fn default() -> Self {
        Self::new(Arc::new(Taxonomy::default()))
    }
}

#[async_trait]
impl TaggingStrategy for LocalTagger {
    async fn tag_entry(
        &self,
        title: Option<&str>,
        context: Option<&str>,
    ) -> TaggingResult<EntryTags> {
        Ok(self.tag(title, context))
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// Tagging delegated to a text-generation capability
pub struct RemoteTagger {
    generator: Option<Arc<dyn TextGenerator>>,
    taxonomy: Arc<Taxonomy>,
    unconfigured_reason: String,
}

impl RemoteTagger {
    pub fn new(generator: Arc<dyn TextGenerator>, taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            generator: Some(generator),
            taxonomy,
            unconfigured_reason: String::new(),
        }
    }

    /// A remote tagger whose capability is missing; every call fails
    pub fn unconfigured(reason: impl Into<String>, taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            generator: None,
            taxonomy,
            unconfigured_reason: reason.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// JSON Schema sent with every request
    pub fn response_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "domain_tags": {
                    "type": "array",
                    "items": { "type": "string", "enum": self.taxonomy.domain_names() }
                },
                "sentiment_tag": {
                    "type": "string",
                    "enum": SentimentTag::literals()
                },
                "keywords": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": REMOTE_MIN_KEYWORDS,
                    "maxItems": REMOTE_MAX_KEYWORDS
                }
            },
            "required": ["domain_tags", "sentiment_tag", "keywords"],
            "additionalProperties": false
        })
    }

    /// Structured request for one entry
    pub fn build_request(&self, title: Option<&str>, context: Option<&str>) -> StructuredRequest {
        StructuredRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            schema_name: SCHEMA_NAME.to_string(),
            schema: self.response_schema(),
            user_content: format!(
                "Title: {}\nContext: {}",
                title.unwrap_or(""),
                context.unwrap_or("")
            ),
        }
    }

    /// Validate a response object into tags; any deviation is an error
    pub fn parse_response(&self, value: &Value) -> TaggingResult<EntryTags> {
        let object = value.as_object().ok_or_else(|| {
            TaggingError::InvalidResponseShape("response is not a JSON object".to_string())
        })?;

        let domain_tags: BTreeSet<String> =
            string_array(object, "domain_tags")?.into_iter().collect();
        if let Some(unknown) = domain_tags.iter().find(|d| !self.taxonomy.has_domain(d)) {
            return Err(TaggingError::InvalidResponseShape(format!(
                "unknown domain tag '{}'",
                unknown
            )));
        }

        let sentiment_tag = required(object, "sentiment_tag")?
            .as_str()
            .and_then(|s| s.parse::<SentimentTag>().ok())
            .ok_or_else(|| {
                TaggingError::InvalidResponseShape(
                    "sentiment_tag must be positive, neutral or negative".to_string(),
                )
            })?;

        let mut seen = HashSet::new();
        let keywords: Vec<String> = string_array(object, "keywords")?
            .into_iter()
            .filter(|keyword| seen.insert(keyword.to_lowercase()))
            .collect();
        if !(REMOTE_MIN_KEYWORDS..=REMOTE_MAX_KEYWORDS).contains(&keywords.len()) {
            return Err(TaggingError::InvalidResponseShape(format!(
                "expected {}-{} keywords, got {}",
                REMOTE_MIN_KEYWORDS,
                REMOTE_MAX_KEYWORDS,
                keywords.len()
            )));
        }

        Ok(EntryTags {
            domain_tags,
            sentiment_tag,
            keywords,
        })
    }
}

fn required<'a>(object: &'a Map<String, Value>, field: &str) -> TaggingResult<&'a Value> {
    object
        .get(field)
        .ok_or_else(|| TaggingError::InvalidResponseShape(format!("missing field: {}", field)))
}

fn string_array(object: &Map<String, Value>, field: &str) -> TaggingResult<Vec<String>> {
    let malformed =
        || TaggingError::InvalidResponseShape(format!("{} must be an array of strings", field));

    required(object, field)?
        .as_array()
        .ok_or_else(malformed)?
        .iter()
        .map(|item| {
            let text = item.as_str().ok_or_else(malformed)?.trim();
            if text.is_empty() {
                return Err(TaggingError::InvalidResponseShape(format!(
                    "{} contains a blank entry",
                    field
                )));
            }
            Ok(text.to_string())
        })
        .collect()
}

#[async_trait]
impl TaggingStrategy for RemoteTagger {
    async fn tag_entry(
        &self,
        title: Option<&str>,
        context: Option<&str>,
    ) -> TaggingResult<EntryTags> {
        let generator = self.generator.as_ref().ok_or_else(|| {
            TaggingError::Unavailable(format!(
                "text generation not configured: {}",
                self.unconfigured_reason
            ))
        })?;

        let request = self.build_request(title, context);
        let value = generator.generate_structured(&request).await.map_err(|e| {
            warn!("Remote tagging failed: {}", e);
            TaggingError::Unavailable(e.to_string())
        })?;

        let tags = self.parse_response(&value).map_err(|e| {
            warn!("Remote tagging returned an invalid response: {}", e);
            e
        })?;

        debug!(
            "Remote tagging produced {} domains, {} keywords",
            tags.domain_tags.len(),
            tags.keywords.len()
        );
        Ok(tags)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// Entry point used by the surrounding service: one strategy chosen at construction
#[derive(Clone)]
pub struct TaggingService {
    strategy: Arc<dyn TaggingStrategy>,
    timeout: Option<Duration>,
}

impl TaggingService {
    pub fn new(strategy: Arc<dyn TaggingStrategy>) -> Self {
        Self {
            strategy,
            timeout: None,
        }
    }

    /// Bound every call by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Pick the strategy for this deployment.
    ///
    /// `auto` uses the remote strategy only when an API key is available.
    /// `remote` without a key yields a remote tagger that reports itself
    /// unavailable on every call rather than silently tagging locally.
    pub fn from_config(config: &PonderConfig, taxonomy: Arc<Taxonomy>) -> Self {
        let strategy: Arc<dyn TaggingStrategy> = match config.tagging.mode {
            TaggingMode::Local => Arc::new(LocalTagger::new(taxonomy)),
            TaggingMode::Remote => match LlmService::from_env(config.llm.clone()) {
                Ok(llm) => Arc::new(RemoteTagger::new(Arc::new(llm), taxonomy)),
                Err(e) => {
                    warn!("Remote tagging requested but unavailable: {}", e);
                    Arc::new(RemoteTagger::unconfigured(e.to_string(), taxonomy))
                }
            },
            TaggingMode::Auto => match LlmService::from_env(config.llm.clone()) {
                Ok(llm) => Arc::new(RemoteTagger::new(Arc::new(llm), taxonomy)),
                Err(_) => {
                    debug!("No LLM credentials, using local tagging");
                    Arc::new(LocalTagger::new(taxonomy))
                }
            },
        };

        info!("Tagging strategy: {}", strategy.name());

        let service = Self::new(strategy);
        match config.tagging.timeout_secs {
            Some(secs) => service.with_timeout(Duration::from_secs(secs)),
            None => service,
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl TaggingStrategy for TaggingService {
    async fn tag_entry(
        &self,
        title: Option<&str>,
        context: Option<&str>,
    ) -> TaggingResult<EntryTags> {
        match self.timeout {
            Some(timeout) => {
                self.strategy
                    .tag_entry_with_timeout(title, context, timeout)
                    .await
            }
            None => self.strategy.tag_entry(title, context).await,
        }
    }

    fn name(&self) -> &'static str {
        self.strategy.name()
    }
}
