//! Services layer for Ponder
//!
//! Provides LLM integration, entry tagging, and the decision-support coach.

pub mod coach;
pub mod llm;
pub mod tagging;

pub use coach::{CoachReply, CoachService};
pub use llm::{
    ChatMessage, ChatRole, CompletionRequest, LlmConfig, LlmService, StructuredRequest,
    TextGenerator,
};
pub use tagging::{LocalTagger, RemoteTagger, TaggingService, TaggingStrategy};
