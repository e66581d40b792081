//! Integration tests for the hosted completion clients
//!
//! Runs `GeminiClient` and `OllamaClient` against a `wiremock` mock server.

use chatkeep::config::{GeminiConfig, OllamaConfig};
use chatkeep::error::ChatkeepError;
use chatkeep::providers::{CompletionClient, GeminiClient, OllamaClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEMINI_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn gemini_client(server: &MockServer) -> GeminiClient {
    GeminiClient::new(GeminiConfig {
        model: "models/gemini-2.0-flash".to_string(),
        api_base: format!("{}/v1beta", server.uri()),
        api_key: Some("test-key".to_string()),
    })
    .unwrap()
}

fn ollama_client(server: &MockServer) -> OllamaClient {
    OllamaClient::new(OllamaConfig {
        host: server.uri(),
        model: "llama3.2:latest".to_string(),
    })
    .unwrap()
}

#[tokio::test]
async fn test_gemini_generate_returns_first_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "user: Hello"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hi! How can I help?"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 6}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = gemini_client(&server).generate("user: Hello").await.unwrap();
    assert_eq!(reply, "Hi! How can I help?");
}

#[tokio::test]
async fn test_gemini_http_error_is_completion_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("RESOURCE_EXHAUSTED"))
        .mount(&server)
        .await;

    let err = gemini_client(&server).generate("user: Hello").await.unwrap_err();
    assert!(matches!(err, ChatkeepError::Completion(_)));
    assert!(err.to_string().contains("429"));
    assert!(err.to_string().contains("RESOURCE_EXHAUSTED"));
}

#[tokio::test]
async fn test_gemini_malformed_body_is_completion_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = gemini_client(&server).generate("user: Hello").await.unwrap_err();
    assert!(matches!(err, ChatkeepError::Completion(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_completion_error() {
    let client = OllamaClient::new(OllamaConfig {
        host: "http://127.0.0.1:1".to_string(),
        ..Default::default()
    })
    .unwrap();

    let err = client.generate("user: Hello").await.unwrap_err();
    assert!(matches!(err, ChatkeepError::Completion(_)));
    assert!(err.to_string().contains("request failed"));
}

#[tokio::test]
async fn test_ollama_generate_returns_response_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(json!({
            "model": "llama3.2:latest",
            "prompt": "user: Hello",
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.2:latest",
            "response": "Hello from Ollama",
            "done": true,
            "prompt_eval_count": 4,
            "eval_count": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = ollama_client(&server).generate("user: Hello").await.unwrap();
    assert_eq!(reply, "Hello from Ollama");
}

#[tokio::test]
async fn test_ollama_missing_model_is_completion_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": "model 'llama3.2:latest' not found"})),
        )
        .mount(&server)
        .await;

    let err = ollama_client(&server).generate("user: Hello").await.unwrap_err();
    assert!(matches!(err, ChatkeepError::Completion(_)));
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn test_ollama_body_without_response_is_completion_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"done": true})))
        .mount(&server)
        .await;

    let err = ollama_client(&server).generate("user: Hello").await.unwrap_err();
    assert!(matches!(err, ChatkeepError::Completion(_)));
}
