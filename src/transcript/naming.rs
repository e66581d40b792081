//! Transcript file-name derivation
//!
//! A transcript is named after its first user turn: the first 50 characters
//! are lowercased, stripped of everything outside `[a-z0-9]`, whitespace and
//! `-`, and runs of whitespace/hyphens become a single hyphen.

use super::Transcript;
use regex::Regex;
use std::sync::OnceLock;

/// Fixed file-name prefix for transcript files
pub const FILE_PREFIX: &str = "chat_";

/// Fixed file-name extension for transcript files
pub const FILE_SUFFIX: &str = ".json";

/// Slug used when the transcript has no usable user turn
pub const FALLBACK_SLUG: &str = "unnamed-chat";

/// Number of characters of the first user turn considered for the slug
pub const NAME_SOURCE_CHARS: usize = 50;

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9\s-]").expect("static regex"))
}

fn separator_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s-]+").expect("static regex"))
}

/// Normalize free text into a filesystem-safe slug
///
/// The result may be empty or consist only of hyphens; [`derive_slug`]
/// handles those cases.
///
/// # Examples
///
/// ```
/// use chatkeep::transcript::slugify;
///
/// assert_eq!(slugify("Hello, World!!!  How are you?"), "hello-world-how-are-you");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let filtered = disallowed_chars().replace_all(&lowered, "");
    separator_runs().replace_all(&filtered, "-").into_owned()
}

/// Slug for a transcript, from its first user turn
///
/// Falls back to [`FALLBACK_SLUG`] when there is no user turn or the turn
/// contains no letters or digits.
pub fn derive_slug(transcript: &Transcript) -> String {
    let Some(turn) = transcript.first_user_turn() else {
        return FALLBACK_SLUG.to_string();
    };

    let source: String = turn.content.chars().take(NAME_SOURCE_CHARS).collect();
    let slug = slugify(&source);
    if slug.chars().any(|c| c.is_ascii_alphanumeric()) {
        slug
    } else {
        FALLBACK_SLUG.to_string()
    }
}

/// File name for a slug: prefix, slug, suffix
pub fn file_name_for(slug: &str) -> String {
    format!("{FILE_PREFIX}{slug}{FILE_SUFFIX}")
}

/// Whether `name` follows the transcript naming convention
pub fn is_transcript_file_name(name: &str) -> bool {
    name.len() >= FILE_PREFIX.len() + FILE_SUFFIX.len()
        && name.starts_with(FILE_PREFIX)
        && name.ends_with(FILE_SUFFIX)
}
