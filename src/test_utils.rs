//! Test utilities for Chatkeep
//!
//! This module provides temporary directory management and a scripted
//! completion client.

use crate::error::ChatkeepError;
use crate::providers::CompletionClient;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Completion client that replays a fixed script of replies
///
/// Each call to `generate` pops the next scripted entry; `Err(text)` entries
/// become [`ChatkeepError::Completion`]. Every prompt received is recorded.
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the prompts received so far
    pub fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> String {
        "scripted-model".to_string()
    }

    async fn generate(&self, context: &str) -> Result<String, ChatkeepError> {
        self.prompts.lock().unwrap().push(context.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(ChatkeepError::Completion(message)),
            None => Err(ChatkeepError::Completion("script exhausted".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[tokio::test]
    async fn test_scripted_client_replays_in_order() {
        let client = ScriptedClient::new(vec![Ok("a".to_string()), Err("b".to_string())]);
        assert_eq!(client.generate("p1").await.unwrap(), "a");
        assert!(matches!(
            client.generate("p2").await,
            Err(ChatkeepError::Completion(_))
        ));
        assert!(client.generate("p3").await.is_err());
        assert_eq!(client.prompts().lock().unwrap().len(), 3);
    }
}
