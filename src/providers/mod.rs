//! Completion client module for Chatkeep
//!
//! This module contains the completion client abstraction and the hosted
//! backends (Gemini, Ollama) behind it.

pub mod base;
pub mod gemini;
pub mod ollama;

pub use base::CompletionClient;
pub use gemini::GeminiClient;
pub use ollama::OllamaClient;

use crate::config::ProviderConfig;
use crate::error::ChatkeepError;

/// Provider type names accepted by [`create_client`]
pub const PROVIDER_TYPES: [&str; 2] = ["gemini", "ollama"];

/// Create a completion client based on configuration
///
/// # Arguments
///
/// * `config` - Provider configuration; `provider_type` selects the backend
///
/// # Returns
///
/// Returns a boxed client instance
///
/// # Errors
///
/// Returns error if the provider type is unknown or initialization fails
///
/// # Examples
///
/// ```
/// use chatkeep::config::ProviderConfig;
/// use chatkeep::providers::{create_client, CompletionClient};
///
/// let mut config = ProviderConfig::default();
/// config.provider_type = "ollama".to_string();
/// config.ollama.model = "gemma2:2b".to_string();
/// let client = create_client(&config).unwrap();
/// assert_eq!(client.model(), "gemma2:2b");
/// ```
pub fn create_client(config: &ProviderConfig) -> Result<Box<dyn CompletionClient>, ChatkeepError> {
    match config.provider_type.as_str() {
        "gemini" => Ok(Box::new(GeminiClient::new(config.gemini.clone())?)),
        "ollama" => Ok(Box::new(OllamaClient::new(config.ollama.clone())?)),
        other => Err(ChatkeepError::Config(format!(
            "Unknown provider type: {}. Must be one of: {}",
            other,
            PROVIDER_TYPES.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeminiConfig, OllamaConfig};

    fn config(provider_type: &str) -> ProviderConfig {
        ProviderConfig {
            provider_type: provider_type.to_string(),
            gemini: GeminiConfig {
                api_key: Some("test-key".to_string()),
                ..Default::default()
            },
            ollama: OllamaConfig::default(),
        }
    }

    #[test]
    fn test_create_client_invalid_type() {
        let result = create_client(&config("invalid"));
        assert!(matches!(result, Err(ChatkeepError::Config(_))));
    }

    #[test]
    fn test_create_client_gemini_default() {
        let client = create_client(&config("gemini")).unwrap();
        assert_eq!(client.name(), "gemini");
    }

    #[test]
    fn test_create_client_gemini_without_key_fails() {
        let mut cfg = config("gemini");
        cfg.gemini.api_key = None;
        assert!(create_client(&cfg).is_err());
    }

    #[test]
    fn test_create_client_ollama_uses_configured_model() {
        let mut cfg = config("ollama");
        cfg.ollama.model = "gemma2:2b".to_string();
        let client = create_client(&cfg).unwrap();
        assert_eq!(client.name(), "ollama");
        assert_eq!(client.model(), "gemma2:2b");
    }

    #[test]
    fn test_create_client_gemini_uses_configured_model() {
        let mut cfg = config("gemini");
        cfg.gemini.model = "gemini-1.5-pro".to_string();
        let client = create_client(&cfg).unwrap();
        assert_eq!(client.model(), "gemini-1.5-pro");
    }
}
