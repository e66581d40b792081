//! Action handlers for the chat front-end
//!
//! Every user action is a value of [`Action`]. [`ChatController::dispatch`]
//! applies it to a [`Session`], talks to the [`TranscriptStore`] and the
//! [`CompletionClient`] as needed, and returns the [`Notice`]s the user
//! should see. [`ChatController::handle`] does the same and then calls the
//! [`Renderer`] exactly once.
//!
//! No error escapes a handler: store failures become error notices, a failed
//! load leaves an empty conversation, and a failed completion becomes an
//! assistant turn carrying the error text.

use crate::error::ChatkeepError;
use crate::providers::CompletionClient;
use crate::session::Session;
use crate::store::{TranscriptRef, TranscriptStore};
use crate::transcript::{Transcript, Turn};
use std::fmt;

/// Prefix of the assistant turn recorded when a completion fails
pub const COMPLETION_ERROR_PREFIX: &str = "Sorry, I encountered an error:";

/// A user action on the chat front-end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Save the outgoing conversation and start an empty one
    StartNewChat,
    /// Replace the active conversation with a saved transcript
    SelectChat(TranscriptRef),
    /// Delete a saved transcript
    DeleteChat(TranscriptRef),
    /// Send a message and record the assistant's reply
    SubmitMessage(String),
}

/// Severity of a [`Notice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// The action completed and changed stored state
    Success,
    /// The action failed; the session was left usable
    Error,
}

/// A transient message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// How the front-end should present the message
    pub level: NoticeLevel,
    /// Text shown to the user
    pub message: String,
}

impl Notice {
    /// Build a [`NoticeLevel::Success`] notice
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Build a [`NoticeLevel::Error`] notice
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Returns true for error notices
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Observer redrawn once after every handled action
pub trait Renderer {
    /// Draw the session and the notices produced by the last action
    fn render(&mut self, session: &Session, notices: &[Notice]);
}

/// Applies [`Action`]s to a [`Session`]
pub struct ChatController {
    store: TranscriptStore,
    client: Box<dyn CompletionClient>,
}

impl ChatController {
    /// Create a controller over a store and a completion client
    pub fn new(store: TranscriptStore, client: Box<dyn CompletionClient>) -> Self {
        Self { store, client }
    }

    /// Backing transcript store
    pub fn store(&self) -> &TranscriptStore {
        &self.store
    }

    /// Completion client replies come from
    pub fn client(&self) -> &dyn CompletionClient {
        self.client.as_ref()
    }

    /// Apply one action and render once
    pub async fn handle<R>(&self, session: &mut Session, action: Action, renderer: &mut R)
    where
        R: Renderer + ?Sized,
    {
        let notices = self.dispatch(session, action).await;
        renderer.render(session, &notices);
    }

    /// Apply one action to the session
    ///
    /// # Returns
    ///
    /// Returns the notices to surface to the user, possibly none
    ///
    /// # Examples
    ///
    /// ```
    /// use async_trait::async_trait;
    /// use chatkeep::controller::{Action, ChatController};
    /// use chatkeep::error::ChatkeepError;
    /// use chatkeep::providers::CompletionClient;
    /// use chatkeep::session::Session;
    /// use chatkeep::store::TranscriptStore;
    ///
    /// struct Offline;
    ///
    /// #[async_trait]
    /// impl CompletionClient for Offline {
    ///     fn name(&self) -> &str {
    ///         "offline"
    ///     }
    ///     fn model(&self) -> String {
    ///         "none".to_string()
    ///     }
    ///     async fn generate(&self, _context: &str) -> Result<String, ChatkeepError> {
    ///         Err(ChatkeepError::Completion("no network".to_string()))
    ///     }
    /// }
    ///
    /// # tokio_test::block_on(async {
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = TranscriptStore::open(dir.path()).unwrap();
    /// let controller = ChatController::new(store, Box::new(Offline));
    /// let mut session = Session::new();
    ///
    /// let notices = controller
    ///     .dispatch(&mut session, Action::SubmitMessage("Hello".to_string()))
    ///     .await;
    /// assert!(notices[0].is_error());
    /// assert_eq!(session.transcript().len(), 2);
    /// # });
    /// ```
    pub async fn dispatch(&self, session: &mut Session, action: Action) -> Vec<Notice> {
        match action {
            Action::StartNewChat => self.start_new_chat(session),
            Action::SelectChat(reference) => self.select_chat(session, reference),
            Action::DeleteChat(reference) => self.delete_chat(&reference),
            Action::SubmitMessage(text) => self.submit_message(session, text).await,
        }
    }

    fn start_new_chat(&self, session: &mut Session) -> Vec<Notice> {
        let outgoing = session.reset();
        match self.store.save(&outgoing) {
            Ok(Some(reference)) => {
                vec![Notice::success(format!("Saved current chat as {}", reference))]
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Discarding unsaved chat: {}", e);
                vec![Notice::error(format!("Error saving chat history: {}", e))]
            }
        }
    }

    fn select_chat(&self, session: &mut Session, reference: TranscriptRef) -> Vec<Notice> {
        match self.store.load(&reference) {
            Ok(transcript) => {
                session.replace(transcript, Some(reference));
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Loading {} failed, starting empty: {}", reference, e);
                session.replace(Transcript::new(), Some(reference));
                vec![Notice::error(format!("Error: {}", e))]
            }
        }
    }

    fn delete_chat(&self, reference: &TranscriptRef) -> Vec<Notice> {
        let title = reference.display_title();
        if self.store.delete(reference) {
            vec![Notice::success(format!("Deleted chat: {}", title))]
        } else {
            vec![Notice::error(format!("Failed to delete chat: {}", title))]
        }
    }

    async fn submit_message(&self, session: &mut Session, text: String) -> Vec<Notice> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        session.append(Turn::user(text));

        let mut notices = Vec::new();
        let reply = match self.client.generate(&session.context()).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Completion via {} failed: {}", self.client.name(), e);
                let detail = match e {
                    ChatkeepError::Completion(message) => message,
                    other => other.to_string(),
                };
                notices.push(Notice::error(format!("Error generating response: {}", detail)));
                format!("{} {}", COMPLETION_ERROR_PREFIX, detail)
            }
        };

        session.append(Turn::assistant(reply));
        notices
    }
}
