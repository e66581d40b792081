//! Active conversation state
//!
//! A [`Session`] is the in-memory turn sequence being edited plus the saved
//! transcript it was loaded from, if any. It is an explicit value owned by
//! the front-end and passed by reference to the action handlers.

use crate::store::TranscriptRef;
use crate::transcript::{Transcript, Turn};

/// The conversation currently being edited
#[derive(Debug, Clone, Default)]
pub struct Session {
    transcript: Transcript,
    current_ref: Option<TranscriptRef>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns of the active conversation
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Saved transcript the session was loaded from
    pub fn current_ref(&self) -> Option<&TranscriptRef> {
        self.current_ref.as_ref()
    }

    /// Append a turn to the active conversation
    pub fn append(&mut self, turn: Turn) {
        self.transcript.push(turn);
    }

    /// Start over with an empty conversation, returning the outgoing one
    pub fn reset(&mut self) -> Transcript {
        self.current_ref = None;
        std::mem::take(&mut self.transcript)
    }

    /// Replace the active conversation with one read from the store
    ///
    /// # Arguments
    ///
    /// * `transcript` - Loaded turns (empty when loading failed)
    /// * `reference` - Reference the turns were read from
    pub fn replace(&mut self, transcript: Transcript, reference: Option<TranscriptRef>) {
        self.transcript = transcript;
        self.current_ref = reference;
    }

    /// Conversation rendered for the completion client
    pub fn context(&self) -> String {
        self.transcript.to_context()
    }

    /// Returns true if the active conversation has no turns
    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }
}
