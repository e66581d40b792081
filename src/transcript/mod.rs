//! Conversation transcript model
//!
//! A [`Transcript`] is the ordered, append-only sequence of [`Turn`]s that
//! makes up one conversation. This module defines the turn types, the
//! document codec ([`codec`]), and file-name derivation ([`naming`]).

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

pub mod codec;
pub mod naming;

pub use codec::{decode, decode_named, encode};
pub use naming::{derive_slug, file_name_for, slugify};

/// Textual timestamp format used for every turn, second precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Label rendered for turns whose timestamp is not available
pub const TIMESTAMP_NOT_AVAILABLE: &str = "N/A";

/// Role value substituted when a stored turn has no role
pub const UNKNOWN_ROLE: &str = "unknown";

/// Author of a turn
///
/// Only `user` and `assistant` are produced by this crate. Any other value
/// read from an older or hand-edited file is preserved verbatim in
/// [`Role::Other`] so that it survives a load/save cycle.
///
/// Equality and hashing go through [`Role::as_str`], so `Other("user")`
/// and `User` are the same role, as they are on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Message typed by the person using the front-end
    User,
    /// Message produced by the completion client
    Assistant,
    /// Legacy or unrecognised role value
    Other(String),
}

impl Role {
    /// Placeholder role for stored turns that carry no role at all
    pub fn unknown() -> Self {
        Self::Other(UNKNOWN_ROLE.to_string())
    }

    /// The role as it is written to disk and to the conversation context
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Other(other) => other,
        }
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Role {}

impl Hash for Role {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => Self::User,
            "assistant" => Self::Assistant,
            _ => Self::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wall-clock time a turn was recorded, kept in its textual form
///
/// The text is stored exactly as read so that a legacy value in an
/// unexpected format still round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Current local time formatted with [`TIMESTAMP_FORMAT`]
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    /// Format a naive date-time with [`TIMESTAMP_FORMAT`]
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self(datetime.format(TIMESTAMP_FORMAT).to_string())
    }

    /// Wrap already-formatted text without validating it
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The stored text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parsed date-time, if the text follows [`TIMESTAMP_FORMAT`]
    pub fn parse(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.0, TIMESTAMP_FORMAT).ok()
    }

    /// `HH:MM:SS` caption for display
    ///
    /// Falls back to the raw text when it does not parse.
    pub fn time_of_day(&self) -> String {
        match self.parse() {
            Some(datetime) => datetime.format("%H:%M:%S").to_string(),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "codec::StoredTurn")]
pub struct Turn {
    /// Author of the message
    pub role: Role,
    /// Message text
    pub content: String,
    /// When the turn was recorded; `None` when a stored turn had no timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

impl Turn {
    /// Create a turn stamped with the current local time
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Some(Timestamp::now()),
        }
    }

    /// Create a user turn stamped with the current local time
    ///
    /// # Examples
    ///
    /// ```
    /// use chatkeep::transcript::{Role, Turn};
    ///
    /// let turn = Turn::user("Hello!");
    /// assert_eq!(turn.role, Role::User);
    /// assert!(turn.timestamp.is_some());
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant turn stamped with the current local time
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Replace the timestamp
    pub fn with_timestamp(mut self, timestamp: Option<Timestamp>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Time-of-day caption, or [`TIMESTAMP_NOT_AVAILABLE`]
    pub fn time_caption(&self) -> String {
        self.timestamp
            .as_ref()
            .map(Timestamp::time_of_day)
            .unwrap_or_else(|| TIMESTAMP_NOT_AVAILABLE.to_string())
    }
}

/// Ordered sequence of turns making up one conversation
///
/// Turns are only ever appended; the order is creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Turns in creation order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Iterate over turns in creation order
    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript has no turns
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// First turn authored by the user, if any
    pub fn first_user_turn(&self) -> Option<&Turn> {
        self.turns.iter().find(|turn| turn.role == Role::User)
    }

    /// Render the conversation as the single prompt string sent to a
    /// completion client: one `role: content` line per turn, oldest first
    ///
    /// # Examples
    ///
    /// ```
    /// use chatkeep::transcript::{Transcript, Turn};
    ///
    /// let transcript = Transcript::from(vec![Turn::user("hi"), Turn::assistant("hello")]);
    /// assert_eq!(transcript.to_context(), "user: hi\nassistant: hello");
    /// ```
    pub fn to_context(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("{}: {}", turn.role, turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<Turn>> for Transcript {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}
