//! Integration tests for the chat-completions client and remote tagging
//!
//! Runs against a wiremock server; no real provider is contacted.

use ponder_core::services::{CompletionRequest, RemoteTagger};
use ponder_core::{
    ChatMessage, CoachService, PonderError, SentimentTag, TaggingError, TaggingStrategy,
    TextGenerator,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{completion_body, create_test_llm_service, default_taxonomy};

#[tokio::test]
async fn test_generate_sends_conversation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test-key"))
        .and(body_partial_json(json!({"model": "test-model"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("  Sleep on it.  ")))
        .expect(1)
        .mount(&server)
        .await;

    let llm = create_test_llm_service(&server.uri());
    let reply = llm
        .generate(&CompletionRequest {
            messages: vec![ChatMessage::user("Should I quit?")],
        })
        .await
        .unwrap();

    assert_eq!(reply, "Sleep on it.");
}

#[tokio::test]
async fn test_remote_tagging_end_to_end() {
    let server = MockServer::start().await;
    let content = json!({
        "domain_tags": ["career"],
        "sentiment_tag": "negative",
        "keywords": ["layoff", "severance", "job search"]
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "response_format": {"type": "json_schema", "json_schema": {"name": "entry_tags"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&content)))
        .mount(&server)
        .await;

    let tagger = RemoteTagger::new(
        Arc::new(create_test_llm_service(&server.uri())),
        default_taxonomy(),
    );
    let tags = tagger
        .tag_entry(Some("Laid off"), Some("Got the news today"))
        .await
        .unwrap();

    assert_eq!(tags.sentiment_tag, SentimentTag::Negative);
    assert_eq!(tags.keywords, vec!["layoff", "severance", "job search"]);
    assert!(tags.domain_tags.contains("career"));
}

#[tokio::test]
async fn test_structured_calls_use_structured_model() {
    let server = MockServer::start().await;
    let content = json!({
        "domain_tags": [],
        "sentiment_tag": "neutral",
        "keywords": ["move", "city", "rent"]
    })
    .to_string();

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "model": "test-structured-model",
            "response_format": {"type": "json_schema"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&content)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "test-model"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Noted.")))
        .expect(1)
        .mount(&server)
        .await;

    let llm = Arc::new(create_test_llm_service(&server.uri()));
    let tags = RemoteTagger::new(llm.clone(), default_taxonomy())
        .tag_entry(Some("Moving cities"), None)
        .await
        .unwrap();
    assert_eq!(tags.keywords, vec!["move", "city", "rent"]);

    let reply = llm
        .generate(&CompletionRequest {
            messages: vec![ChatMessage::user("Thoughts?")],
        })
        .await
        .unwrap();
    assert_eq!(reply, "Noted.");
}

#[tokio::test]
async fn test_remote_tagging_missing_keywords_is_error() {
    let server = MockServer::start().await;
    let content = json!({"domain_tags": [], "sentiment_tag": "neutral"}).to_string();
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&content)))
        .mount(&server)
        .await;

    let tagger = RemoteTagger::new(
        Arc::new(create_test_llm_service(&server.uri())),
        default_taxonomy(),
    );
    let err = tagger.tag_entry(Some("Anything"), None).await.unwrap_err();

    assert!(matches!(err, TaggingError::InvalidResponseShape(_)));
}

#[tokio::test]
async fn test_non_json_content_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("sure! here you go")))
        .mount(&server)
        .await;

    let tagger = RemoteTagger::new(
        Arc::new(create_test_llm_service(&server.uri())),
        default_taxonomy(),
    );
    let err = tagger.tag_entry(Some("Anything"), None).await.unwrap_err();

    assert!(matches!(err, TaggingError::Unavailable(_)));
}

#[tokio::test]
async fn test_error_status_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let llm = create_test_llm_service(&server.uri());
    let err = llm
        .generate(&CompletionRequest {
            messages: vec![ChatMessage::user("hi")],
        })
        .await
        .unwrap_err();

    match err {
        PonderError::LlmApi(msg) => {
            assert!(msg.contains("429"));
            assert!(msg.contains("rate limited"));
        }
        other => panic!("expected LlmApi error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_choices_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let llm = create_test_llm_service(&server.uri());
    let result = llm
        .generate(&CompletionRequest {
            messages: vec![ChatMessage::user("hi")],
        })
        .await;

    assert!(matches!(result, Err(PonderError::LlmApi(_))));
}

#[tokio::test]
async fn test_coach_degrades_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let coach = CoachService::new(Arc::new(create_test_llm_service(&server.uri())));
    let reply = coach
        .chat(&[ChatMessage::user("Take the job?")])
        .await
        .unwrap();

    assert!(reply.degraded);
    assert!(reply.reply.starts_with("AI (fallback): I see you said 'Take the job?'"));
}
