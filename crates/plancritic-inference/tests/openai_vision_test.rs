//! Integration tests for the OpenAI-compatible vision backend.
//!
//! A wiremock server stands in for the provider. Tests verify:
//! - Bearer auth, model, sampling parameters and the image part are sent
//! - The first choice's content is returned
//! - Provider error bodies are classified into `Error::Provider`
//! - `PlanAnalyzer` makes exactly one call per analysis

use std::sync::Arc;

use plancritic_core::{format_score_line, AnalysisRequest, Error, Scores};
use plancritic_inference::openai::{OpenAIConfig, OpenAIVisionBackend};
use plancritic_inference::{PlanAnalyzer, SamplingParams, VisionBackend, VisionRequest};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> OpenAIVisionBackend {
    OpenAIVisionBackend::new(OpenAIConfig {
        base_url: server.uri(),
        api_key: Some("test-key".to_string()),
        vision_model: "test-vision".to_string(),
        timeout_seconds: 10,
    })
    .expect("Failed to create backend")
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 900, "completion_tokens": 100, "total_tokens": 1000}
    })
}

fn vision_request() -> VisionRequest {
    VisionRequest {
        system: "system text".to_string(),
        user: "user text".to_string(),
        image_data_uri: "data:image/png;base64,AQID".to_string(),
        sampling: SamplingParams::default(),
    }
}

#[tokio::test]
async fn test_completion_request_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-vision",
            "max_tokens": 3000,
            "stream": false,
            "messages": [
                {"role": "system", "content": [{"type": "text", "text": "system text"}]},
                {"role": "user", "content": [
                    {"type": "text", "text": "user text"},
                    {"type": "image_url", "image_url": {"url": "data:image/png;base64,AQID"}}
                ]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("critique")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let reply = backend.complete(&vision_request()).await;

    assert_eq!(reply.unwrap(), "critique");
}

#[tokio::test]
async fn test_auth_failure_is_provider_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = backend_for(&mock_server)
        .complete(&vision_request())
        .await
        .unwrap_err();

    match err {
        Error::Provider(msg) => {
            assert!(msg.contains("Authentication failed"));
            assert!(msg.contains("Incorrect API key provided"));
        }
        other => panic!("Expected Provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_error_body_is_provider_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = backend_for(&mock_server)
        .complete(&vision_request())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Provider(_)));
    assert!(err.to_string().contains("Server error"));
}

#[tokio::test]
async fn test_missing_choices_yield_empty_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&mock_server)
        .await;

    let reply = backend_for(&mock_server)
        .complete(&vision_request())
        .await
        .unwrap();
    assert_eq!(reply, "");
}

#[tokio::test]
async fn test_analyzer_single_call_end_to_end() {
    let mock_server = MockServer::start().await;
    let scores = Scores::clamped(70, 65, 45, 50);
    let content = format!("پاراگراف یک.\nپاراگراف دو.\n{}", format_score_line(&scores));

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "temperature": 0.6,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&content)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let analyzer = PlanAnalyzer::new(Arc::new(backend_for(&mock_server)));
    let request = AnalysisRequest::new(vec![0x89, 0x50, 0x4E, 0x47], "image/png", None, None);
    let result = analyzer.analyze(&request).await.unwrap();

    assert_eq!(result.text, "پاراگراف یک.\nپاراگراف دو.");
    assert_eq!(result.scores, Some(scores));
}

#[tokio::test]
async fn test_health_check_against_models_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .mount(&mock_server)
        .await;

    assert!(backend_for(&mock_server).health_check().await.unwrap());
}
