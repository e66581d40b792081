//! Transcript storage
//!
//! Save, load, list, and delete transcripts kept as one JSON file each in a
//! single flat directory.

use crate::error::ChatkeepError;
use crate::transcript::{self, naming, Transcript};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub mod types;
pub use types::TranscriptRef;

/// Whole-document storage for transcripts in one flat directory
///
/// Each transcript lives in its own `chat_<slug>.json` file. There is no
/// index, cache, or partial update: every call opens, reads or writes, and
/// closes exactly one file. The store assumes it is the only writer.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    dir: PathBuf,
}

impl TranscriptStore {
    /// Open a store rooted at `dir`, creating the directory if absent
    ///
    /// # Errors
    ///
    /// Returns [`ChatkeepError::Store`] if the directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatkeep::store::TranscriptStore;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = TranscriptStore::open(dir.path().join("chat_histories")).unwrap();
    /// assert!(store.list().unwrap().is_empty());
    /// ```
    pub fn open<P: Into<PathBuf>>(dir: P) -> Result<Self, ChatkeepError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| ChatkeepError::store("creating history directory", &dir, e))?;
        tracing::debug!("Opened transcript store at {}", dir.display());
        Ok(Self { dir })
    }

    /// Backing directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file behind a reference
    pub fn path_for(&self, reference: &TranscriptRef) -> PathBuf {
        self.dir.join(reference.file_name())
    }

    /// Every transcript file in the directory, file names descending
    ///
    /// File contents are not opened, so corrupt files are listed too.
    ///
    /// # Errors
    ///
    /// Returns [`ChatkeepError::Store`] if the directory cannot be read.
    pub fn list(&self) -> Result<Vec<TranscriptRef>, ChatkeepError> {
        let entries = std::fs::read_dir(&self.dir)
            .map_err(|e| ChatkeepError::store("listing", &self.dir, e))?;

        let mut refs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ChatkeepError::store("listing", &self.dir, e))?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if let Ok(reference) = TranscriptRef::parse(&name) {
                refs.push(reference);
            }
        }

        refs.sort_unstable_by(|a, b| b.cmp(a));
        tracing::debug!("Listed {} transcripts in {}", refs.len(), self.dir.display());
        Ok(refs)
    }

    /// Write a transcript under its derived name
    ///
    /// An empty transcript is not written and yields `Ok(None)`. Otherwise
    /// the whole file is (re)written, replacing any transcript whose first
    /// user turn normalizes to the same slug.
    ///
    /// # Errors
    ///
    /// Returns [`ChatkeepError::Store`] on any write failure.
    pub fn save(&self, transcript: &Transcript) -> Result<Option<TranscriptRef>, ChatkeepError> {
        if transcript.is_empty() {
            tracing::debug!("Skipping save of empty transcript");
            return Ok(None);
        }

        let file_name = naming::file_name_for(&naming::derive_slug(transcript));
        let reference = TranscriptRef::from_file_name(file_name);
        let path = self.path_for(&reference);
        let bytes = transcript::encode(transcript)?;

        std::fs::write(&path, bytes).map_err(|e| ChatkeepError::store("writing", &path, e))?;
        tracing::info!("Saved {} turns to {}", transcript.len(), path.display());
        Ok(Some(reference))
    }

    /// Read and decode a stored transcript
    ///
    /// # Errors
    ///
    /// Returns [`ChatkeepError::NotFound`] if the file does not exist,
    /// [`ChatkeepError::Decode`] if it is not a valid transcript document, and
    /// [`ChatkeepError::Store`] for any other read failure.
    pub fn load(&self, reference: &TranscriptRef) -> Result<Transcript, ChatkeepError> {
        let path = self.path_for(reference);
        let bytes = std::fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ChatkeepError::NotFound(reference.to_string()),
            _ => ChatkeepError::store("reading", &path, e),
        })?;

        let transcript = transcript::decode_named(reference.file_name(), &bytes)?;
        tracing::info!("Loaded {} turns from {}", transcript.len(), path.display());
        Ok(transcript)
    }

    /// Remove a stored transcript
    ///
    /// # Errors
    ///
    /// Returns [`ChatkeepError::NotFound`] if the file does not exist and
    /// [`ChatkeepError::Store`] if it cannot be removed.
    pub fn remove(&self, reference: &TranscriptRef) -> Result<(), ChatkeepError> {
        let path = self.path_for(reference);
        std::fs::remove_file(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ChatkeepError::NotFound(reference.to_string()),
            _ => ChatkeepError::store("deleting", &path, e),
        })?;
        tracing::info!("Deleted {}", path.display());
        Ok(())
    }

    /// Remove a stored transcript, reporting only success or failure
    ///
    /// Failures are logged; use [`TranscriptStore::remove`] to inspect them.
    pub fn delete(&self, reference: &TranscriptRef) -> bool {
        match self.remove(reference) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to delete {}: {}", reference, e);
                false
            }
        }
    }
}
