//! Gemini client and interview coach against a mocked generateContent endpoint

use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use internstud::coach::{CoachError, GeminiClient, InterviewCoach, TextGenerator};
use internstud::interview::{FinalFeedbackRequest, InterviewType, QaPair};

fn create_client(mock_server: &MockServer) -> GeminiClient {
    GeminiClient::new("test-api-key", "test-model", 10)
        .unwrap()
        .with_base_url(mock_server.uri())
}

fn text_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP"
        }]
    }))
}

#[tokio::test]
async fn test_generate_success_joins_parts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .and(header("x-goog-api-key", "test-api-key"))
        .and(body_string_contains("Hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hi " }, { "text": "there" }] }
            }]
        })))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let text = client.generate("Hello").await.unwrap();
    assert_eq!(text, "Hi there");
}

#[tokio::test]
async fn test_network_failure_does_not_expose_key() {
    let client = GeminiClient::new("secret-gemini-key", "test-model", 5)
        .unwrap()
        .with_base_url("http://127.0.0.1:1");

    let err = client.generate("Hello").await.unwrap_err();
    assert!(matches!(err, CoachError::Network(_)));
    assert_eq!(err.error_code(), "AI_UNAVAILABLE");
    assert!(!err.to_string().contains("secret-gemini-key"));
    assert!(!format!("{:?}", err).contains("secret-gemini-key"));
}

#[tokio::test]
async fn test_http_error_is_typed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    match client.generate("Hello").await {
        Err(CoachError::Http { status, body }) => {
            assert_eq!(status, 403);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_no_candidates_is_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": []
        })))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    assert!(matches!(
        client.generate("Hello").await,
        Err(CoachError::EmptyResponse)
    ));
}

#[tokio::test]
async fn test_coach_question_from_fenced_model_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .and(body_string_contains("technical interview question for a Software Engineer"))
        .respond_with(text_response(
            "```json\n{\"question\": \"Explică diferența dintre stivă și coadă.\", \"expectedKeywords\": [\"LIFO\", \"FIFO\"], \"difficulty\": \"începător\"}\n```",
        ))
        .mount(&mock_server)
        .await;

    let coach = InterviewCoach::new(Arc::new(create_client(&mock_server)), "Romanian");
    let question = coach
        .generate_question(Some("Software Engineer"), None, InterviewType::Technical, &[])
        .await
        .unwrap();

    assert_eq!(question.question, "Explică diferența dintre stivă și coadă.");
    assert_eq!(question.expected_keywords, vec!["LIFO", "FIFO"]);
}

#[tokio::test]
async fn test_coach_final_feedback_rejects_prose() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .respond_with(text_response("I cannot produce a score for this interview."))
        .mount(&mock_server)
        .await;

    let coach = InterviewCoach::new(Arc::new(create_client(&mock_server)), "Romanian");
    let result = coach
        .final_feedback(&FinalFeedbackRequest {
            role: Some("General".to_string()),
            answers: vec![QaPair {
                question: "Why us?".to_string(),
                answer: "Growth".to_string(),
            }],
        })
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, CoachError::NoJsonObject));
    assert_eq!(err.error_code(), "AI_INVALID_RESPONSE");
}
