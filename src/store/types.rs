use crate::error::ChatkeepError;
use crate::transcript::naming::{is_transcript_file_name, FILE_PREFIX, FILE_SUFFIX};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to one stored transcript: its bare file name
///
/// References sort by file name, which is the order [`super::TranscriptStore::list`]
/// reports them in (descending).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TranscriptRef(String);

impl TranscriptRef {
    /// Validate a file name as a transcript reference
    ///
    /// Only bare names following the `chat_<slug>.json` convention are
    /// accepted, so a reference can never point outside the backing
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`ChatkeepError::NotFound`] for anything else.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatkeep::store::TranscriptRef;
    ///
    /// assert!(TranscriptRef::parse("chat_hello.json").is_ok());
    /// assert!(TranscriptRef::parse("../chat_hello.json").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self, ChatkeepError> {
        let bare = !name.contains(['/', '\\']) && name != "." && name != "..";
        if bare && is_transcript_file_name(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(ChatkeepError::NotFound(name.to_string()))
        }
    }

    /// Reference for an already-derived file name
    pub(crate) fn from_file_name(name: String) -> Self {
        Self(name)
    }

    /// The file name
    pub fn file_name(&self) -> &str {
        &self.0
    }

    /// Human-readable title: prefix and extension removed, hyphens turned
    /// into spaces, each word capitalized
    ///
    /// # Examples
    ///
    /// ```
    /// use chatkeep::store::TranscriptRef;
    ///
    /// let r = TranscriptRef::parse("chat_hello-world-how-are-you.json").unwrap();
    /// assert_eq!(r.display_title(), "Hello World How Are You");
    /// ```
    pub fn display_title(&self) -> String {
        let stem = self
            .0
            .strip_prefix(FILE_PREFIX)
            .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
            .unwrap_or(&self.0);

        let title = stem
            .replace('-', " ")
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");

        if title.is_empty() {
            self.0.clone()
        } else {
            title
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl TryFrom<String> for TranscriptRef {
    type Error = ChatkeepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TranscriptRef> for String {
    fn from(value: TranscriptRef) -> Self {
        value.0
    }
}

impl fmt::Display for TranscriptRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
