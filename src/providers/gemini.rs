//! Gemini completion client for Chatkeep
//!
//! This module implements [`CompletionClient`] against the Generative
//! Language API `models/{model}:generateContent` endpoint. The conversation
//! is sent as a single user content part and the first text part of the
//! first candidate is returned.

use crate::config::GeminiConfig;
use crate::error::ChatkeepError;
use crate::providers::CompletionClient;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client
///
/// # Examples
///
/// ```no_run
/// use chatkeep::config::GeminiConfig;
/// use chatkeep::providers::{CompletionClient, GeminiClient};
///
/// # async fn example() -> Result<(), chatkeep::error::ChatkeepError> {
/// let config = GeminiConfig {
///     api_key: Some("my-key".to_string()),
///     ..Default::default()
/// };
/// let client = GeminiClient::new(config)?;
/// let reply = client.generate("user: Hello!").await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate
    fn into_text(self) -> Result<String, ChatkeepError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ChatkeepError::Completion(format!(
                "Gemini blocked the prompt: {}",
                reason
            )));
        }

        let candidate = self.candidates.into_iter().next().ok_or_else(|| {
            ChatkeepError::Completion("Gemini response contained no candidates".to_string())
        })?;
        let finish_reason = candidate.finish_reason;

        candidate
            .content
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| {
                ChatkeepError::Completion(format!(
                    "Gemini candidate contained no text (finish reason: {})",
                    finish_reason.as_deref().unwrap_or("unknown")
                ))
            })
    }
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Errors
    ///
    /// Returns [`ChatkeepError::Config`] when no API key is configured and
    /// [`ChatkeepError::Completion`] if HTTP client initialization fails.
    pub fn new(config: GeminiConfig) -> Result<Self, ChatkeepError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ChatkeepError::Config(
                    "Gemini API key is not set (provider.gemini.api_key or GEMINI_API_KEY)"
                        .to_string(),
                )
            })?;

        let client = Client::builder()
            .user_agent(concat!("chatkeep/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChatkeepError::Completion(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Gemini client: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn generate_url(&self) -> String {
        let model = self.config.model.trim_start_matches("models/");
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }

    async fn generate(&self, context: &str) -> Result<String, ChatkeepError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: context }],
            }],
        };

        tracing::debug!(
            "Sending Gemini request: model={}, {} prompt bytes",
            self.config.model,
            context.len()
        );

        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                ChatkeepError::Completion(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(ChatkeepError::Completion(format!(
                "Gemini returned error {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            ChatkeepError::Completion(format!("Failed to parse Gemini response: {}", e))
        })?;

        body.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> GeminiConfig {
        GeminiConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        let result = GeminiClient::new(GeminiConfig {
            api_key: None,
            ..Default::default()
        });
        assert!(matches!(result, Err(ChatkeepError::Config(_))));
    }

    #[test]
    fn test_new_rejects_blank_api_key() {
        let result = GeminiClient::new(GeminiConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(ChatkeepError::Config(_))));
    }

    #[test]
    fn test_generate_url_strips_models_prefix() {
        let client = GeminiClient::new(GeminiConfig {
            model: "models/gemini-2.0-flash".to_string(),
            api_base: "https://example.test/v1beta/".to_string(),
            api_key: Some("k".to_string()),
        })
        .unwrap();
        assert_eq!(
            client.generate_url(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_name_and_model() {
        let client = GeminiClient::new(config_with_key()).unwrap();
        assert_eq!(client.name(), "gemini");
        assert_eq!(client.model(), "gemini-2.0-flash");
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: "user: hi" }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "user: hi");
        assert_eq!(json["contents"][0]["role"], "user");
    }

    #[test]
    fn test_into_text_first_candidate_first_part() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(body.into_text().unwrap(), "first");
    }

    #[test]
    fn test_into_text_without_candidates_is_error() {
        let body: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(body.into_text(), Err(ChatkeepError::Completion(_))));
    }

    #[test]
    fn test_into_text_blocked_prompt_is_error() {
        let body: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        let err = body.into_text().unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_into_text_candidate_without_parts_reports_finish_reason() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": []}, "finishReason": "MAX_TOKENS"}]}"#,
        )
        .unwrap();
        let err = body.into_text().unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }
}
