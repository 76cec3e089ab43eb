//! Decision-support coach
//!
//! Conversational helper for thinking a decision through. Unlike tagging,
//! the coach is best effort: a missing or failing LLM produces a canned
//! reply flagged as degraded instead of an error.

use crate::error::{PonderError, Result};
use crate::services::llm::{ChatMessage, ChatRole, CompletionRequest, TextGenerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Prompts offered alongside every reply
pub const DEFAULT_SUGGESTIONS: [&str; 3] = [
    "Clarify your goals",
    "Consider possible outcomes",
    "Reflect on your values",
];

/// Coach answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachReply {
    pub reply: String,
    pub suggestions: Vec<String>,
    /// True when the reply is canned because the LLM was missing or failed
    pub degraded: bool,
}

impl CoachReply {
    fn new(reply: String, degraded: bool) -> Self {
        Self {
            reply,
            suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            degraded,
        }
    }
}

pub struct CoachService {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl CoachService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// Coach that always answers with the canned reply
    pub fn offline() -> Self {
        Self { generator: None }
    }

    /// Answer the latest user message in `messages`
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<CoachReply> {
        let last_user_msg = match messages.last() {
            Some(message) if message.role == ChatRole::User => message.content.as_str(),
            _ => {
                return Err(PonderError::InvalidConversation(
                    "Last message must be from user.".to_string(),
                ))
            }
        };

        let Some(generator) = &self.generator else {
            debug!("Coach running without an LLM");
            return Ok(CoachReply::new(
                format!(
                    "AI (mock): I see you said '{}'. How can I help you think this through? (LLM not configured)",
                    last_user_msg
                ),
                true,
            ));
        };

        let request = CompletionRequest {
            messages: messages.to_vec(),
        };

        match generator.generate(&request).await {
            Ok(reply) => Ok(CoachReply::new(reply.trim().to_string(), false)),
            Err(e) => {
                warn!("Coach LLM call failed, answering with fallback: {}", e);
                Ok(CoachReply::new(
                    format!(
                        "AI (fallback): I see you said '{}'. How can I help you think this through? (LLM error: {})",
                        last_user_msg, e
                    ),
                    true,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::llm::MockTextGenerator;

    #[tokio::test]
    async fn test_requires_trailing_user_message() {
        let coach = CoachService::offline();
        let err = coach
            .chat(&[ChatMessage::user("hi"), ChatMessage::assistant("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, PonderError::InvalidConversation(_)));
        assert!(coach.chat(&[]).await.is_err());
    }

    #[tokio::test]
    async fn test_offline_reply() {
        let reply = CoachService::offline()
            .chat(&[ChatMessage::user("Should I move?")])
            .await
            .unwrap();
        assert!(reply.degraded);
        assert!(reply.reply.starts_with("AI (mock): I see you said 'Should I move?'"));
        assert_eq!(reply.suggestions.len(), 3);
    }

    #[tokio::test]
    async fn test_generator_reply_is_trimmed() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|request| request.messages.len() == 2)
            .returning(|_| Ok("  Think about what matters most.\n".to_string()));

        let coach = CoachService::new(Arc::new(generator));
        let reply = coach
            .chat(&[ChatMessage::system("Be brief."), ChatMessage::user("Help")])
            .await
            .unwrap();
        assert_eq!(reply.reply, "Think about what matters most.");
        assert!(!reply.degraded);
    }

    #[tokio::test]
    async fn test_generator_error_falls_back() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(PonderError::LlmApi("rate limited".to_string())));

        let reply = CoachService::new(Arc::new(generator))
            .chat(&[ChatMessage::user("Help")])
            .await
            .unwrap();
        assert!(reply.degraded);
        assert!(reply.reply.starts_with("AI (fallback):"));
        assert!(reply.reply.contains("rate limited"));
    }
}
