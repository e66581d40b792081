//! Chatkeep - terminal chat with saved transcripts
//!
//! This library provides the core functionality for Chatkeep: a chat
//! front-end that keeps each conversation as a named transcript file and
//! forwards the conversation to a hosted model.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `transcript`: Turn and Transcript types, the JSON codec, and file naming
//! - `store`: Save, load, list, and delete transcripts in a flat directory
//! - `providers`: Completion client abstraction and implementations (Gemini, Ollama)
//! - `session`: The conversation currently being edited
//! - `controller`: Action handlers applying user actions to a session
//! - `commands`: Interactive terminal front-end
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Launch option definition
//!
//! # Example
//!
//! ```no_run
//! use chatkeep::store::TranscriptStore;
//! use chatkeep::transcript::{Transcript, Turn};
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = TranscriptStore::open("chat_histories")?;
//!
//!     let mut transcript = Transcript::new();
//!     transcript.push(Turn::user("Hello, World!"));
//!     let saved = store.save(&transcript)?;
//!     assert_eq!(saved.unwrap().file_name(), "chat_hello-world.json");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod providers;
pub mod session;
pub mod store;
pub mod transcript;

// Re-export commonly used types
pub use config::Config;
pub use controller::{Action, ChatController, Notice, NoticeLevel, Renderer};
pub use error::{ChatkeepError, Result};
pub use providers::CompletionClient;
pub use session::Session;
pub use store::{TranscriptRef, TranscriptStore};
pub use transcript::{Role, Timestamp, Transcript, Turn};

#[cfg(test)]
pub mod test_utils;
