//! Configuration management for Chatkeep
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and launch options.

use crate::error::{ChatkeepError, Result};
use crate::providers::PROVIDER_TYPES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Chatkeep
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Transcript history configuration
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Provider configuration
///
/// Specifies which completion backend to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,
}

fn default_provider_type() -> String {
    "gemini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            gemini: GeminiConfig::default(),
            ollama: OllamaConfig::default(),
        }
    }
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model to send requests to
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Generative Language API base URL (useful for tests and proxies)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// API key; usually supplied through the environment instead
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
            api_key: None,
        }
    }
}

/// Ollama provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Model to use for Ollama
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:latest".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
        }
    }
}

/// Transcript history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Directory holding `chat_*.json` transcript files
    #[serde(default = "default_history_dir")]
    pub dir: PathBuf,
}

fn default_history_dir() -> PathBuf {
    PathBuf::from("chat_histories")
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            dir: default_history_dir(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and launch-option overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - Parsed launch options for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChatkeepError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ChatkeepError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("CHATKEEP_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(model) = std::env::var("CHATKEEP_GEMINI_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(key) = std::env::var("CHATKEEP_GEMINI_API_KEY") {
            self.provider.gemini.api_key = Some(key);
        } else if self.provider.gemini.api_key.is_none() {
            if let Ok(key) = std::env::var("GEMINI_API_KEY") {
                self.provider.gemini.api_key = Some(key);
            }
        }

        if let Ok(host) = std::env::var("CHATKEEP_OLLAMA_HOST") {
            self.provider.ollama.host = host;
        }

        if let Ok(model) = std::env::var("CHATKEEP_OLLAMA_MODEL") {
            self.provider.ollama.model = model;
        }

        if let Ok(dir) = std::env::var("CHATKEEP_HISTORY_DIR") {
            tracing::debug!(dir = %dir, "Env override: CHATKEEP_HISTORY_DIR");
            self.history.dir = PathBuf::from(dir);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(dir) = &cli.history_dir {
            self.history.dir = dir.clone();
        }

        if let Some(provider) = &cli.provider {
            self.provider.provider_type = provider.clone();
        }

        if let Some(model) = &cli.model {
            match self.provider.provider_type.as_str() {
                "ollama" => self.provider.ollama.model = model.clone(),
                _ => self.provider.gemini.model = model.clone(),
            }
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(ChatkeepError::Config("Provider type cannot be empty".to_string()).into());
        }

        if !PROVIDER_TYPES.contains(&self.provider.provider_type.as_str()) {
            return Err(ChatkeepError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                PROVIDER_TYPES.join(", ")
            ))
            .into());
        }

        if self.provider.gemini.model.trim().is_empty() {
            return Err(
                ChatkeepError::Config("provider.gemini.model cannot be empty".to_string()).into(),
            );
        }

        if self.provider.ollama.model.trim().is_empty() {
            return Err(
                ChatkeepError::Config("provider.ollama.model cannot be empty".to_string()).into(),
            );
        }

        if self.history.dir.as_os_str().is_empty() {
            return Err(ChatkeepError::Config("history.dir cannot be empty".to_string()).into());
        }

        Ok(())
    }
}
