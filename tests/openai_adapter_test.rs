use httpmock::prelude::*;
use serde_json::json;

use yaad::application::ports::{
    ChatMessage, Embedder, EmbedderError, LanguageModel, LanguageModelError,
};
use yaad::infrastructure::llm::{OpenAiClient, OpenAiEmbedder};

fn embedder_for(server: &MockServer) -> OpenAiEmbedder {
    OpenAiEmbedder::new(
        "oa-test-key".to_string(),
        Some(server.base_url()),
        "text-embedding-ada-002".to_string(),
    )
}

fn client_for(server: &MockServer) -> OpenAiClient {
    OpenAiClient::new(
        "oa-test-key".to_string(),
        Some(server.base_url()),
        "gpt-4".to_string(),
        "text-moderation-latest".to_string(),
    )
}

#[tokio::test]
async fn given_successful_response_when_embedding_then_first_vector_is_returned() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/embeddings")
                .header("authorization", "Bearer oa-test-key")
                .json_body(json!({
                    "input": "remember the barn",
                    "model": "text-embedding-ada-002"
                }));
            then.status(200).json_body(json!({
                "data": [{ "embedding": [0.1, 0.2, 0.3] }]
            }));
        })
        .await;

    let embedding = embedder_for(&server)
        .embed("remember the barn")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(embedding.values, vec![0.1, 0.2, 0.3]);
    assert_eq!(embedding.dimensions(), 3);
}

#[tokio::test]
async fn given_rate_limit_status_when_embedding_then_rate_limited_is_returned() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/embeddings");
            then.status(429).body("slow down");
        })
        .await;

    let err = embedder_for(&server).embed("anything").await.unwrap_err();

    assert!(matches!(err, EmbedderError::RateLimited));
}

#[tokio::test]
async fn given_empty_data_when_embedding_then_invalid_response_is_returned() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/embeddings");
            then.status(200).json_body(json!({ "data": [] }));
        })
        .await;

    let err = embedder_for(&server).embed("anything").await.unwrap_err();

    assert!(matches!(err, EmbedderError::InvalidResponse(_)));
}

#[tokio::test]
async fn given_flagged_result_when_moderating_then_true_is_returned() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/moderations")
                .header("authorization", "Bearer oa-test-key")
                .json_body(json!({
                    "model": "text-moderation-latest",
                    "input": "something nasty"
                }));
            then.status(200).json_body(json!({
                "results": [{ "flagged": true }]
            }));
        })
        .await;

    let flagged = client_for(&server).moderate("something nasty").await.unwrap();

    mock.assert_async().await;
    assert!(flagged);
}

#[tokio::test]
async fn given_clean_result_when_moderating_then_false_is_returned() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/moderations");
            then.status(200).json_body(json!({
                "results": [{ "flagged": false }]
            }));
        })
        .await;

    let flagged = client_for(&server).moderate("hello").await.unwrap();

    assert!(!flagged);
}

#[tokio::test]
async fn given_empty_results_when_moderating_then_invalid_response_is_returned() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/moderations");
            then.status(200).json_body(json!({ "results": [] }));
        })
        .await;

    let err = client_for(&server).moderate("hello").await.unwrap_err();

    assert!(matches!(err, LanguageModelError::InvalidResponse(_)));
}

#[tokio::test]
async fn given_chat_completion_when_completing_then_message_content_is_returned() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer oa-test-key")
                .json_body(json!({
                    "model": "gpt-4",
                    "messages": [
                        { "role": "system", "content": "You are a helpful assistant." },
                        { "role": "user", "content": "classify this" }
                    ]
                }));
            then.status(200).json_body(json!({
                "choices": [{ "message": { "role": "assistant", "content": "Top Secret" } }]
            }));
        })
        .await;

    let messages = [
        ChatMessage::system("You are a helpful assistant."),
        ChatMessage::user("classify this"),
    ];

    let content = client_for(&server).complete(&messages).await.unwrap();

    mock.assert_async().await;
    assert_eq!(content, "Top Secret");
}

#[tokio::test]
async fn given_no_choices_when_completing_then_invalid_response_is_returned() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({ "choices": [] }));
        })
        .await;

    let err = client_for(&server)
        .complete(&[ChatMessage::user("hello")])
        .await
        .unwrap_err();

    assert!(matches!(err, LanguageModelError::InvalidResponse(_)));
}

#[tokio::test]
async fn given_rate_limit_status_when_completing_then_rate_limited_is_returned() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429).body("slow down");
        })
        .await;

    let err = client_for(&server)
        .complete(&[ChatMessage::user("hello")])
        .await
        .unwrap_err();

    assert!(matches!(err, LanguageModelError::RateLimited));
}
