//! Common test utilities and helpers

#![allow(dead_code)]

use ponder_core::{LlmConfig, LlmService, Taxonomy, ValueSnapshot};
use secrecy::SecretString;
use std::sync::Arc;

/// Built-in taxonomy behind an `Arc`
pub fn default_taxonomy() -> Arc<Taxonomy> {
    Arc::new(Taxonomy::default())
}

/// Snapshot from `(value, score)` pairs
pub fn snapshot(values: &[(&str, i64)]) -> ValueSnapshot {
    values.iter().map(|(name, score)| (*name, *score)).collect()
}

/// LLM service pointed at a local mock server
pub fn create_test_llm_service(base_url: &str) -> LlmService {
    let config = LlmConfig {
        base_url: base_url.to_string(),
        model: "test-model".to_string(),
        structured_model: "test-structured-model".to_string(),
        timeout_secs: 5,
        ..LlmConfig::default()
    };
    LlmService::new(config, Some(SecretString::new("sk-test-key".into())))
        .expect("Failed to create test LLM service")
}

/// Chat-completions body whose first choice carries `content`
pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}
