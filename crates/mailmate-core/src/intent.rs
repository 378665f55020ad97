//! Lexical intent classification for chat utterances.
//!
//! An utterance is matched against a fixed set of phrases; no language model
//! is consulted. Rules are evaluated in order and the first match wins:
//!
//! 1. contains `last 5`, `read emails` or `show emails` → [`Intent::ListRecent`]
//! 2. starts with `reply` → [`Intent::Reply`]
//! 3. starts with `delete` → [`Intent::Delete`]
//! 4. anything else → [`Intent::Unknown`]
//!
//! Matching is case-insensitive.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

/// Phrases that request the most recent emails when found anywhere in an utterance.
pub const LIST_RECENT_PHRASES: [&str; 3] = ["last 5", "read emails", "show emails"];

const REPLY_PREFIX: &str = "reply";
const DELETE_PREFIX: &str = "delete";

/// Leading integer of a token: optional sign followed by decimal digits.
static LEADING_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+").expect("leading integer pattern is valid"));

/// A 1-based email position exactly as the user typed it.
///
/// The classifier never validates the position against the inbox; an index
/// that could not be parsed is kept as the not-a-number sentinel and is
/// forwarded to the backend as JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmailIndex(Option<i64>);

impl EmailIndex {
    /// The sentinel for a missing or non-numeric index.
    pub const NAN: EmailIndex = EmailIndex(None);

    pub fn new(position: i64) -> Self {
        Self(Some(position))
    }

    /// Parses the leading integer of `token`.
    ///
    /// `"3"` and `"3rd"` both yield 3. A missing token, a token without
    /// leading digits, or a value outside the `i64` range yields [`EmailIndex::NAN`].
    pub fn parse(token: Option<&str>) -> Self {
        token
            .and_then(|t| LEADING_INTEGER.find(t))
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .map_or(Self::NAN, Self::new)
    }

    pub fn value(&self) -> Option<i64> {
        self.0
    }

    pub fn is_nan(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for EmailIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(position) => write!(f, "{}", position),
            None => f.write_str("NaN"),
        }
    }
}

impl Serialize for EmailIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// The classified meaning of a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Show the most recent emails with summaries.
    ListRecent,
    /// Draft a reply to the email at `index`.
    Reply { index: EmailIndex },
    /// Move the email at `index` to the trash.
    Delete { index: EmailIndex },
    /// The utterance matched no command form.
    Unknown,
}

impl Intent {
    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::ListRecent => "list_recent",
            Intent::Reply { .. } => "reply",
            Intent::Delete { .. } => "delete",
            Intent::Unknown => "unknown",
        }
    }

    /// Whether resolving this intent needs a backend round-trip.
    pub fn needs_gateway(&self) -> bool {
        !matches!(self, Intent::Unknown)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Reply { index } | Intent::Delete { index } => {
                write!(f, "{}({})", self.kind(), index)
            }
            _ => f.write_str(self.kind()),
        }
    }
}

/// Classifies an utterance into an [`Intent`].
pub fn classify(utterance: &str) -> Intent {
    let lowered = utterance.to_lowercase();

    if LIST_RECENT_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
    {
        return Intent::ListRecent;
    }

    if lowered.starts_with(REPLY_PREFIX) {
        return Intent::Reply {
            index: index_argument(utterance),
        };
    }

    if lowered.starts_with(DELETE_PREFIX) {
        return Intent::Delete {
            index: index_argument(utterance),
        };
    }

    Intent::Unknown
}

/// The second whitespace-separated token, parsed as an index.
fn index_argument(utterance: &str) -> EmailIndex {
    EmailIndex::parse(utterance.split_whitespace().nth(1))
}
