//! Ollama completion client for Chatkeep
//!
//! This module implements [`CompletionClient`] against an Ollama server's
//! `/api/generate` endpoint, sending the whole conversation as one prompt.

use crate::config::OllamaConfig;
use crate::error::ChatkeepError;
use crate::providers::CompletionClient;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Ollama API client
///
/// # Examples
///
/// ```no_run
/// use chatkeep::config::OllamaConfig;
/// use chatkeep::providers::{CompletionClient, OllamaClient};
///
/// # async fn example() -> Result<(), chatkeep::error::ChatkeepError> {
/// let client = OllamaClient::new(OllamaConfig::default())?;
/// let reply = client.generate("user: Hello!").await?;
/// # Ok(())
/// # }
/// ```
pub struct OllamaClient {
    client: Client,
    config: OllamaConfig,
}

/// Request body for `/api/generate`
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response body from `/api/generate`
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    prompt_eval_count: usize,
    #[serde(default)]
    eval_count: usize,
}

impl OllamaClient {
    /// Create a new Ollama client
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    ///
    /// # Examples
    ///
    /// ```
    /// use chatkeep::config::OllamaConfig;
    /// use chatkeep::providers::OllamaClient;
    ///
    /// let client = OllamaClient::new(OllamaConfig::default());
    /// assert!(client.is_ok());
    /// ```
    pub fn new(config: OllamaConfig) -> Result<Self, ChatkeepError> {
        let client = Client::builder()
            .user_agent(concat!("chatkeep/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChatkeepError::Completion(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Ollama client: host={}, model={}",
            config.host,
            config.model
        );

        Ok(Self { client, config })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.config.host.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionClient for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }

    async fn generate(&self, context: &str) -> Result<String, ChatkeepError> {
        let request = OllamaGenerateRequest {
            model: &self.config.model,
            prompt: context,
            stream: false,
        };

        tracing::debug!(
            "Sending Ollama request: model={}, {} prompt bytes",
            request.model,
            context.len()
        );

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Ollama request failed: {}", e);
                ChatkeepError::Completion(format!("Ollama request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Ollama returned error {}: {}", status, error_text);
            return Err(ChatkeepError::Completion(format!(
                "Ollama returned error {}: {}",
                status, error_text
            )));
        }

        let body: OllamaGenerateResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Ollama response: {}", e);
            ChatkeepError::Completion(format!("Failed to parse Ollama response: {}", e))
        })?;

        tracing::debug!(
            "Ollama response: done={}, prompt_tokens={}, completion_tokens={}",
            body.done,
            body.prompt_eval_count,
            body.eval_count
        );

        body.response.ok_or_else(|| {
            ChatkeepError::Completion("Ollama response did not contain any text".to_string())
        })
    }
}
