//! Coach chat command

use ponder_core::{error::Result, ChatMessage, CoachService, LlmService, PonderConfig};
use std::sync::Arc;
use tracing::debug;

/// Handle single-turn coach chat
pub async fn handle(config: &PonderConfig, message: String) -> Result<()> {
    let coach = match LlmService::new(config.llm.clone(), config.api_key()) {
        Ok(llm) => CoachService::new(Arc::new(llm)),
        Err(e) => {
            debug!("Coach running offline: {}", e);
            CoachService::offline()
        }
    };

    let reply = coach.chat(&[ChatMessage::user(message)]).await?;

    println!("{}", reply.reply);
    println!();
    println!("Suggestions:");
    for suggestion in &reply.suggestions {
        println!("  - {}", suggestion);
    }

    Ok(())
}
