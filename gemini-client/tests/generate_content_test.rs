//! HTTP-level tests for [`gemini_client::GeminiClient`] against a mockito server.
//!
//! Covers: successful text generation, backend error bodies surfaced as
//! `GenerationOutcome::Failure`, safety blocks, empty candidate lists, and the
//! inline-image request shape. No real Gemini calls.

use gemini_client::{GeminiClient, GenerationClient, GenerationOutcome, InlineImage};

fn client_for(server: &mockito::ServerGuard) -> GeminiClient {
    GeminiClient::with_base_url("dummy_key".to_string(), server.url())
}

/// **Test: A candidate with text parts returns Reply with the joined text.**
#[tokio::test]
async fn generate_text_returns_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-pro:generateContent")
        .match_query(mockito::Matcher::UrlEncoded(
            "key".into(),
            "dummy_key".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Hello!"}]}}]}"#)
        .create_async()
        .await;

    let outcome = client_for(&server).generate_text("Hi").await.unwrap();

    mock.assert_async().await;
    assert_eq!(outcome, GenerationOutcome::Reply("Hello!".to_string()));
}

/// **Test: The request body carries the prompt and the fixed text sampling config.**
#[tokio::test]
async fn generate_text_sends_fixed_config() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-pro:generateContent")
        .match_query(mockito::Matcher::Any)
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "contents": [{"parts": [{"text": "Hi"}]}],
            "generationConfig": {
                "temperature": 0.9,
                "topP": 1.0,
                "topK": 1,
                "maxOutputTokens": 8192
            },
            "safetySettings": [
                {"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]}}]}"#)
        .create_async()
        .await;

    client_for(&server).generate_text("Hi").await.unwrap();
    mock.assert_async().await;
}

/// **Test: A non-2xx response with an API error body becomes Failure(message), not Err.**
#[tokio::test]
async fn api_error_body_becomes_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-pro:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#)
        .create_async()
        .await;

    let outcome = client_for(&server).generate_text("Hi").await.unwrap();

    assert_eq!(
        outcome,
        GenerationOutcome::Failure("API key not valid".to_string())
    );
}

/// **Test: A non-JSON error body falls back to the HTTP status as the reason.**
#[tokio::test]
async fn opaque_error_body_falls_back_to_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-pro:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let outcome = client_for(&server).generate_text("Hi").await.unwrap();

    match outcome {
        GenerationOutcome::Failure(reason) => assert!(reason.contains("503")),
        other => panic!("expected Failure, got {:?}", other),
    }
}

/// **Test: A blocked prompt (promptFeedback.blockReason) becomes a Failure.**
#[tokio::test]
async fn safety_block_becomes_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-pro:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[],"promptFeedback":{"blockReason":"SAFETY"}}"#)
        .create_async()
        .await;

    let outcome = client_for(&server).generate_text("Hi").await.unwrap();

    assert_eq!(
        outcome,
        GenerationOutcome::Failure("Prompt blocked: SAFETY".to_string())
    );
}

/// **Test: An empty candidate list becomes a Failure.**
#[tokio::test]
async fn empty_candidates_become_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-pro:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[]}"#)
        .create_async()
        .await;

    let outcome = client_for(&server).generate_text("Hi").await.unwrap();

    assert_eq!(
        outcome,
        GenerationOutcome::Failure("No candidates returned".to_string())
    );
}

/// **Test: Image generation posts to the vision model with inlineData before the text part.**
#[tokio::test]
async fn generate_with_image_uses_vision_model() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-pro-vision:generateContent")
        .match_query(mockito::Matcher::Any)
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "contents": [{"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "QUJD"}},
                {"text": "\nWhat is this a picture of?"}
            ]}],
            "generationConfig": {"temperature": 0.4, "topK": 32, "maxOutputTokens": 2048}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"A cat."}]}}]}"#)
        .create_async()
        .await;

    let image = InlineImage {
        mime_type: "image/png".to_string(),
        data: "QUJD".to_string(),
    };
    let outcome = client_for(&server)
        .generate_with_image(&image, "What is this a picture of?")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(outcome, GenerationOutcome::Reply("A cat.".to_string()));
}
