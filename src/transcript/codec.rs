//! Transcript document codec
//!
//! Transcripts are stored as a pretty-printed JSON array with one object per
//! turn (`role`, `content`, `timestamp`). Decoding is lenient about missing
//! fields so that older or partially written files still load.

use super::{Role, Timestamp, Transcript, Turn};
use crate::error::ChatkeepError;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

/// Label used in decode errors when no file name is known
const UNNAMED_DOCUMENT: &str = "<transcript>";

/// On-disk shape of a turn, with every field optional
#[derive(Debug, Deserialize)]
pub(crate) struct StoredTurn {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
}

impl From<StoredTurn> for Turn {
    fn from(stored: StoredTurn) -> Self {
        Self {
            role: stored.role.map(Role::from).unwrap_or_else(Role::unknown),
            content: stored.content.unwrap_or_default(),
            timestamp: stored.timestamp.map(Timestamp::from_text),
        }
    }
}

/// Serialize a transcript to its durable textual form
///
/// The output is UTF-8 JSON indented with four spaces. Turn order is kept.
///
/// # Errors
///
/// Returns [`ChatkeepError::Serialization`] if serialization fails, which
/// only happens on writer errors.
///
/// # Examples
///
/// ```
/// use chatkeep::transcript::{codec, Transcript, Turn};
///
/// let transcript = Transcript::from(vec![Turn::user("Hello")]);
/// let bytes = codec::encode(&transcript).unwrap();
/// assert_eq!(codec::decode(&bytes).unwrap(), transcript);
/// ```
pub fn encode(transcript: &Transcript) -> Result<Vec<u8>, ChatkeepError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    transcript.serialize(&mut serializer)?;
    Ok(buf)
}

/// Parse a transcript document
///
/// # Errors
///
/// Returns [`ChatkeepError::Decode`] when the bytes are not a JSON array of
/// turn objects.
pub fn decode(bytes: &[u8]) -> Result<Transcript, ChatkeepError> {
    decode_named(UNNAMED_DOCUMENT, bytes)
}

/// Parse a transcript document, labelling errors with `name`
///
/// A turn object missing `role` decodes with the `unknown` role, one missing
/// `content` decodes with empty content, and one missing `timestamp` decodes
/// with no timestamp.
pub fn decode_named(name: &str, bytes: &[u8]) -> Result<Transcript, ChatkeepError> {
    serde_json::from_slice::<Vec<Turn>>(bytes)
        .map(Transcript::from)
        .map_err(|e| ChatkeepError::decode(name, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transcript {
        Transcript::from(vec![
            Turn {
                role: Role::User,
                content: "Quote \" backslash \\ tab\t newline\n emoji 🦀 ünïcödé".to_string(),
                timestamp: Some(Timestamp::from_text("2025-01-02 03:04:05")),
            },
            Turn {
                role: Role::Assistant,
                content: String::new(),
                timestamp: Some(Timestamp::from_text("2025-01-02 03:04:06")),
            },
            Turn {
                role: Role::Other("system".to_string()),
                content: "legacy".to_string(),
                timestamp: None,
            },
        ])
    }

    #[test]
    fn test_roundtrip_preserves_turns_exactly() {
        let transcript = sample();
        let bytes = encode(&transcript).unwrap();
        assert_eq!(decode(&bytes).unwrap(), transcript);
    }

    #[test]
    fn test_roundtrip_of_known_role_built_as_other() {
        let transcript = Transcript::from(vec![
            Turn::new(Role::Other("user".to_string()), "hand built"),
            Turn::new(Role::Other("assistant".to_string()), "reply"),
        ]);
        let bytes = encode(&transcript).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, transcript);
        assert_eq!(decoded.turns()[0].role, Role::User);
    }

    #[test]
    fn test_encode_is_indented_array_of_objects() {
        let transcript = Transcript::from(vec![Turn {
            role: Role::User,
            content: "hi".to_string(),
            timestamp: Some(Timestamp::from_text("2025-01-02 03:04:05")),
        }]);
        let text = String::from_utf8(encode(&transcript).unwrap()).unwrap();
        let expected = "[\n    {\n        \"role\": \"user\",\n        \"content\": \"hi\",\n        \"timestamp\": \"2025-01-02 03:04:05\"\n    }\n]";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_encode_empty_transcript() {
        let bytes = encode(&Transcript::new()).unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        let err = decode(b"{ this is not json").unwrap_err();
        assert!(matches!(err, ChatkeepError::Decode { .. }));
    }

    #[test]
    fn test_decode_rejects_non_array_document() {
        let err = decode_named("chat_x.json", br#"{"role": "user"}"#).unwrap_err();
        match err {
            ChatkeepError::Decode { name, .. } => assert_eq!(name, "chat_x.json"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_missing_content_yields_empty_content() {
        let doc = br#"[{"role": "assistant", "timestamp": "2025-01-02 03:04:05"}]"#;
        let transcript = decode(doc).unwrap();
        let turn = &transcript.turns()[0];
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.content, "");
        assert_eq!(
            turn.timestamp,
            Some(Timestamp::from_text("2025-01-02 03:04:05"))
        );
    }

    #[test]
    fn test_decode_missing_role_yields_unknown() {
        let doc = br#"[{"content": "orphan", "timestamp": "2025-01-02 03:04:05"}]"#;
        let transcript = decode(doc).unwrap();
        assert_eq!(transcript.turns()[0].role, Role::unknown());
        assert_eq!(transcript.turns()[0].content, "orphan");
    }

    #[test]
    fn test_decode_missing_timestamp_is_not_fabricated() {
        let doc = br#"[{"role": "user", "content": "hello"}]"#;
        let transcript = decode(doc).unwrap();
        assert_eq!(transcript.turns()[0].timestamp, None);
    }

    #[test]
    fn test_decode_null_fields_are_treated_as_missing() {
        let doc = br#"[{"role": null, "content": null, "timestamp": null}]"#;
        let transcript = decode(doc).unwrap();
        let turn = &transcript.turns()[0];
        assert_eq!(turn.role, Role::unknown());
        assert_eq!(turn.content, "");
        assert_eq!(turn.timestamp, None);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let doc = br#"[{"role": "user", "content": "x", "timestamp": "t", "extra": 1}]"#;
        assert_eq!(decode(doc).unwrap().len(), 1);
    }

    #[test]
    fn test_decode_accepts_ascii_escaped_unicode() {
        let doc = br#"[{"role": "user", "content": "caf\u00e9 \ud83e\udd80"}]"#;
        let transcript = decode(doc).unwrap();
        assert_eq!(transcript.turns()[0].content, "café 🦀");
    }
}
