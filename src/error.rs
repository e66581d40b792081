//! Error types for Chatkeep
//!
//! This module defines the error taxonomy shared by the transcript codec,
//! the transcript store, the completion clients, and configuration loading,
//! using `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Chatkeep operations
///
/// The first four variants are the transcript lifecycle taxonomy: every one
/// of them is caught by the chat controller and turned into a user-visible
/// notice rather than terminating the process.
#[derive(Error, Debug)]
pub enum ChatkeepError {
    /// Transcript bytes are not a syntactically valid transcript document
    #[error("Could not decode chat history file {name}: {message}")]
    Decode {
        /// File name (or other label) of the document being decoded
        name: String,
        /// Parser diagnostic
        message: String,
    },

    /// A transcript reference does not resolve to a file
    #[error("Chat history file not found: {0}")]
    NotFound(String),

    /// I/O failure in the backing directory other than not-found
    #[error("Storage error while {operation} {}: {source}", .path.display())]
    Store {
        /// What the store was doing when the failure happened
        operation: &'static str,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The hosted completion call failed (network, quota, malformed response)
    #[error("Completion error: {0}")]
    Completion(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ChatkeepError {
    /// Build a [`ChatkeepError::Store`] for an I/O failure at `path`
    pub fn store(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Store {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Build a [`ChatkeepError::Decode`] for the named document
    pub fn decode(name: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Decode {
            name: name.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for application-level Chatkeep operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation. Library
/// operations whose callers need to match on the taxonomy return
/// `std::result::Result<T, ChatkeepError>` instead.
pub type Result<T> = anyhow::Result<T>;
