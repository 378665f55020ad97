//! The ordered chat transcript.

use super::entry::ChatEntry;
use thiserror::Error;

/// Misuse of the transcript API.
///
/// These are programming-logic errors: the conversation controller never
/// triggers them in correct operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    /// `replace_last` was called on an empty transcript.
    #[error("cannot replace the last entry of an empty transcript")]
    Empty,
    /// An append was attempted while a placeholder is still unresolved.
    #[error("a pending entry is still awaiting its result")]
    PendingOutstanding,
}

/// Insertion-ordered sequence of chat entries with at most one pending placeholder.
///
/// The pending placeholder, when present, is always the last entry. The
/// awaiting flag is derived from it, so "awaiting" and "has a pending entry"
/// can never disagree.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<ChatEntry>,
    pending: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a final entry.
    pub fn append(&mut self, entry: ChatEntry) -> Result<(), TranscriptError> {
        if self.pending {
            return Err(TranscriptError::PendingOutstanding);
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Appends a placeholder that marks an in-flight operation.
    pub fn append_pending(&mut self, entry: ChatEntry) -> Result<(), TranscriptError> {
        self.append(entry)?;
        self.pending = true;
        Ok(())
    }

    /// Replaces the last entry in place and resolves any pending placeholder.
    ///
    /// Returns the entry that was replaced.
    pub fn replace_last(&mut self, entry: ChatEntry) -> Result<ChatEntry, TranscriptError> {
        let last = self.entries.last_mut().ok_or(TranscriptError::Empty)?;
        let previous = std::mem::replace(last, entry);
        self.pending = false;
        Ok(previous)
    }

    /// Copy of the entries in insertion order.
    pub fn snapshot(&self) -> Vec<ChatEntry> {
        self.entries.clone()
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    /// The unresolved placeholder, if any.
    pub fn pending_entry(&self) -> Option<&ChatEntry> {
        if self.pending {
            self.entries.last()
        } else {
            None
        }
    }

    /// True while a placeholder is waiting for its result.
    pub fn is_awaiting(&self) -> bool {
        self.pending
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
