//! Completion client capability
//!
//! This module defines the [`CompletionClient`] trait every hosted model
//! backend implements. The conversation is handed over as one opaque string
//! and a single assistant reply comes back, or an error.

use crate::error::ChatkeepError;
use async_trait::async_trait;

/// A hosted generative-language backend
///
/// Implementations perform one request/response exchange per call: no
/// streaming, no retry, no backoff. Every failure (transport, quota, HTTP
/// status, unexpected response shape) is reported as
/// [`ChatkeepError::Completion`].
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use chatkeep::error::ChatkeepError;
/// use chatkeep::providers::CompletionClient;
///
/// struct Echo;
///
/// #[async_trait]
/// impl CompletionClient for Echo {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn model(&self) -> String {
///         "echo-1".to_string()
///     }
///
///     async fn generate(&self, context: &str) -> Result<String, ChatkeepError> {
///         Ok(context.to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Short backend identifier (e.g. "gemini")
    fn name(&self) -> &str;

    /// Model the backend sends requests to
    fn model(&self) -> String;

    /// Produce one assistant reply for the serialized conversation
    ///
    /// # Arguments
    ///
    /// * `context` - Whole conversation as `role: content` lines, oldest first
    ///
    /// # Errors
    ///
    /// Returns [`ChatkeepError::Completion`] if the call fails for any reason
    async fn generate(&self, context: &str) -> Result<String, ChatkeepError>;
}
