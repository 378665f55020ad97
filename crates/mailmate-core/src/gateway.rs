//! Backend Gateway contract.
//!
//! The backend owns authentication, mailbox storage and the AI-generated
//! summaries and replies. This module only describes the operations the chat
//! client needs and the payload shapes it reads back.

use crate::error::Result;
use crate::intent::EmailIndex;
use crate::session::Identity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Remote operations used by the conversation controller and session bootstrap.
///
/// Every call carries the session credentials implicitly; implementations
/// decide how (cookie, header, ...).
#[async_trait::async_trait]
pub trait EmailGateway: Send + Sync {
    /// Asks the backend who the current session belongs to.
    async fn identify(&self) -> Result<Identity>;

    /// Fetches summaries of the most recent emails (up to five).
    ///
    /// The raw JSON value is returned untouched. It is normally an array of
    /// summary records, but any other shape must still be renderable.
    async fn list_recent(&self) -> Result<Value>;

    /// Asks the backend to draft a reply to the email at `index`.
    async fn reply(&self, index: EmailIndex) -> Result<ReplyDraft>;

    /// Asks the backend to delete the email at `index`.
    async fn delete(&self, index: EmailIndex) -> Result<DeleteOutcome>;

    /// Terminates the backend session and returns the redirect target.
    async fn logout(&self) -> Result<String>;

    /// Where an unauthenticated user has to go to sign in.
    fn login_url(&self) -> String;
}

/// Body of the reply and delete requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexRequest {
    pub index: EmailIndex,
}

/// Response of the identity query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityResponse {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Response of the reply operation. The draft is generated, not sent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplyDraft {
    pub reply: String,
}

/// Response of the delete operation: a human-readable status line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteOutcome {
    pub status: String,
}

/// One entry of the recent-emails listing.
///
/// Every field may be missing. Decoding never fails: absent, empty or
/// non-string values simply come back as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailSummary {
    pub index: Option<u64>,
    pub id: Option<String>,
    pub sender: Option<String>,
    pub subject: Option<String>,
    pub summary: Option<String>,
}

impl EmailSummary {
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            index: value.get("index").and_then(Value::as_u64),
            id: text("id"),
            sender: text("sender"),
            subject: text("subject"),
            summary: text("summary"),
        }
    }
}
