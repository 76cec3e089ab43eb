//! Ponder - analysis core for a decision journal
//!
//! Derives structured metadata from free-text journal entries and watches a
//! user's self-rated personal values for signs of inner conflict:
//! - Domain, sentiment and keyword tagging of entries
//! - Interchangeable local (heuristic) and remote (LLM) tagging strategies
//! - Value-tension detection over check-in histories
//! - A best-effort decision-support coach
//!
//! # Architecture
//!
//! - **Types**: Core data structures (JournalEntry, ValueSnapshot, etc.)
//! - **Analysis**: Keyword, domain and sentiment heuristics
//! - **Taxonomy**: Domain keywords, conflict pairs and thresholds
//! - **Services**: LLM integration, tagging strategies, coach
//! - **Tension**: Conflict and rapid-swing detection
//!
//! # Example
//!
//! ```ignore
//! use ponder_core::{LocalTagger, TaggingStrategy, TensionDetector, ValueSnapshot};
//!
//! #[tokio::main]
//! async fn main() -> ponder_core::Result<()> {
//!     let tags = LocalTagger::default()
//!         .tag_entry(Some("Job offer"), Some("Excited but nervous about the salary"))
//!         .await?;
//!     println!("{:?}", tags.domain_tags);
//!
//!     let snapshot = ValueSnapshot::parse(r#"{"Courage": 9, "Caution": 9}"#)?;
//!     let report = TensionDetector::default().detect_tension(&[snapshot]);
//!     println!("{:?}", report.conflicts);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod services;
pub mod taxonomy;
pub mod tension;
pub mod types;

// Re-export commonly used types
pub use config::{PonderConfig, TaggingConfig, TaggingMode};
pub use error::{PonderError, Result, TaggingError, TaggingResult};
pub use services::{
    ChatMessage, ChatRole, CoachReply, CoachService, LlmConfig, LlmService, LocalTagger,
    RemoteTagger, TaggingService, TaggingStrategy, TextGenerator,
};
pub use taxonomy::{ConflictPair, DomainRule, Taxonomy};
pub use tension::{TensionDetector, TensionReport};
pub use types::{EntryId, EntryTags, JournalEntry, SentimentTag, ValueCheckin, ValueSnapshot};
