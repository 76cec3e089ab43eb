//! Text-generation capability
//!
//! The analysis core only needs two things from a language model: free text
//! for a conversation, and a JSON object constrained by a schema. Both sit
//! behind [`TextGenerator`] so strategies can be tested without a network.
//! [`LlmService`] is the production implementation against an
//! OpenAI-compatible chat-completions endpoint.

use crate::error::{PonderError, Result};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::debug;

/// Configuration for the LLM service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Model for free-text conversation
    pub model: String,

    /// Model for schema-constrained calls; must support json_schema response formats
    pub structured_model: String,

    /// Base URL of the chat-completions API
    pub base_url: String,

    /// Max tokens for responses
    pub max_tokens: usize,

    /// Temperature for sampling
    pub temperature: f32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: "gpt-4-1106-preview".to_string(),
            structured_model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            max_tokens: 256,
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key_from_env(&self) -> Option<SecretString> {
        env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|key| SecretString::new(key.into()))
    }
}

/// Who said a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    #[serde(alias = "ai")]
    Assistant,
}

/// One conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Free-text generation request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
}

/// Schema-constrained generation request
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    /// Instruction sent as the system message
    pub system: String,

    /// Name the provider reports the schema under
    pub schema_name: String,

    /// JSON Schema the response object must satisfy
    pub schema: serde_json::Value,

    /// Content sent as the user message
    pub user_content: String,
}

/// A capability that turns prompts into text
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a free-text reply to a conversation
    async fn generate(&self, request: &CompletionRequest) -> Result<String>;

    /// Generate a JSON object matching `request.schema`
    async fn generate_structured(&self, request: &StructuredRequest) -> Result<serde_json::Value>;
}

/// Chat-completions API request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: usize,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat<'a>>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a serde_json::Value,
}

/// Chat-completions API response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// LLM service backed by an OpenAI-compatible API
pub struct LlmService {
    config: LlmConfig,
    api_key: SecretString,
    client: reqwest::Client,
}

impl LlmService {
    /// Create a new LLM service; fails when no API key is supplied
    pub fn new(config: LlmConfig, api_key: Option<SecretString>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.expose_secret().is_empty())
            .ok_or_else(|| {
                PonderError::Config(config::ConfigError::Message(format!(
                    "{} not set",
                    config.api_key_env
                )))
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Create with the API key read from the environment
    pub fn from_env(config: LlmConfig) -> Result<Self> {
        let api_key = config.api_key_from_env();
        Self::new(config, api_key)
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Make one chat-completions call and return the first choice's text
    async fn call_api(
        &self,
        model: &str,
        messages: &[ChatMessage],
        response_format: Option<ResponseFormat<'_>>,
    ) -> Result<String> {
        debug!(
            "Calling chat completions: model={}, messages={}",
            model,
            messages.len()
        );

        let request = ChatCompletionRequest {
            model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            response_format,
        };

        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.config.base_url.trim_end_matches('/')
            ))
            .bearer_auth(self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PonderError::LlmApi(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| PonderError::LlmApi(format!("Failed to parse response: {}", e)))?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PonderError::LlmApi("Empty response from API".to_string()))
    }
}

#[async_trait]
impl TextGenerator for LlmService {
    async fn generate(&self, request: &CompletionRequest) -> Result<String> {
        let reply = self.call_api(&self.config.model, &request.messages, None).await?;
        Ok(reply.trim().to_string())
    }

    async fn generate_structured(&self, request: &StructuredRequest) -> Result<serde_json::Value> {
        let messages = [
            ChatMessage::system(request.system.clone()),
            ChatMessage::user(request.user_content.clone()),
        ];
        let format = ResponseFormat {
            format_type: "json_schema",
            json_schema: JsonSchemaFormat {
                name: &request.schema_name,
                strict: true,
                schema: &request.schema,
            },
        };

        let content = self
            .call_api(&self.config.structured_model, &messages, Some(format))
            .await?;
        let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            PonderError::LlmApi(format!("Structured response is not JSON: {}", e))
        })?;

        if !value.is_object() {
            return Err(PonderError::LlmApi(
                "Structured response is not a JSON object".to_string(),
            ));
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> Option<SecretString> {
        Some(SecretString::new("sk-test".into()))
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let err = LlmService::new(LlmConfig::default(), None).err().unwrap();
        assert!(matches!(err, PonderError::Config(_)));

        let empty = Some(SecretString::new("".into()));
        assert!(LlmService::new(LlmConfig::default(), empty).is_err());
    }

    #[test]
    fn test_service_creation() {
        let service = LlmService::new(LlmConfig::default(), test_key()).unwrap();
        assert_eq!(service.config().model, "gpt-4-1106-preview");
        assert_eq!(service.config().structured_model, "gpt-4o-mini");
    }

    #[test]
    fn test_ai_role_alias() {
        let message: ChatMessage =
            serde_json::from_str(r#"{"role": "ai", "content": "hello"}"#).unwrap();
        assert_eq!(message.role, ChatRole::Assistant);
        assert_eq!(
            serde_json::to_value(&message).unwrap()["role"],
            serde_json::json!("assistant")
        );
    }

    #[test]
    fn test_structured_request_serialization() {
        let schema = serde_json::json!({"type": "object"});
        let messages = [ChatMessage::user("hi")];
        let request = ChatCompletionRequest {
            model: "m",
            messages: &messages,
            max_tokens: 10,
            temperature: 0.0,
            response_format: Some(ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: "entry_tags",
                    strict: true,
                    schema: &schema,
                },
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["response_format"]["type"], "json_schema");
        assert_eq!(value["response_format"]["json_schema"]["name"], "entry_tags");
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[tokio::test]
    #[ignore] // Requires OPENAI_API_KEY
    async fn test_generate_live() {
        let service = LlmService::from_env(LlmConfig::default()).unwrap();
        let reply = service
            .generate(&CompletionRequest {
                messages: vec![ChatMessage::user("Say hello in one word.")],
            })
            .await
            .unwrap();
        assert!(!reply.is_empty());
    }
}
