//! Chat entry types.

use serde::{Deserialize, Serialize};

/// Who wrote a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// Text typed by the user.
    User,
    /// Text produced by the assistant.
    Bot,
}

/// A single entry in the chat transcript.
///
/// Entries are immutable once created. Resolving a pending operation swaps
/// the whole entry for a new one rather than editing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    /// The author of the entry.
    pub author: Author,
    /// The text shown to the user.
    pub text: String,
    /// Timestamp when the entry was created (ISO 8601 format).
    pub timestamp: String,
}

impl ChatEntry {
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Author::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Author::Bot, text)
    }

    pub fn is_bot(&self) -> bool {
        self.author == Author::Bot
    }
}
