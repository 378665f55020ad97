//! User-visible bot copy and result formatting.

use crate::gateway::{DeleteOutcome, EmailSummary, ReplyDraft};
use crate::intent::Intent;
use serde_json::Value;

pub const UNKNOWN_COMMAND: &str =
    "❓ I didn't understand that command. Try:\n• 'read emails'\n• 'reply 1'\n• 'delete 2'";

pub const GENERIC_FAILURE: &str = "❌ Something went wrong. Please try again.";

pub const RECENT_PREAMBLE: &str = "Here's what you have:\n\n";

pub const COMMAND_GUIDE: &str = "• \"read emails\" or \"show last 5\" - View your recent emails with AI summaries
• \"reply 1\" - Generate and send an AI response to email #1
• \"delete 2\" - Remove email #2 from your inbox";

const UNKNOWN_SENDER: &str = "Unknown";
const NO_SUBJECT: &str = "No subject";
const NO_SUMMARY: &str = "No summary";

/// The single entry that opens every transcript.
pub fn welcome(display_name: &str) -> String {
    format!(
        "Hi {display_name}! 👋 I'm your AI email assistant. Here's what I can help you with:\n\n{COMMAND_GUIDE}\n\nTry asking me in natural language!"
    )
}

/// Text of the placeholder shown while `intent` is in flight.
///
/// `None` for intents that resolve without a backend call.
pub fn placeholder(intent: &Intent) -> Option<String> {
    match intent {
        Intent::ListRecent => Some("📧 Fetching your latest emails...".to_string()),
        Intent::Reply { index } => Some(format!("✍️ Generating reply for email #{index}...")),
        Intent::Delete { index } => Some(format!("🗑️ Deleting email #{index}...")),
        Intent::Unknown => None,
    }
}

/// Renders the recent-emails listing.
///
/// An array becomes a numbered list; any other JSON value is shown
/// pretty-printed as received.
pub fn recent_emails(value: &Value) -> String {
    let Some(items) = value.as_array() else {
        return serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    };

    let mut formatted = String::from(RECENT_PREAMBLE);
    for (position, item) in items.iter().enumerate() {
        let email = EmailSummary::from_value(item);
        formatted.push_str(&format!(
            "{}. {}\n   {}\n   {}\n\n",
            position + 1,
            email.sender.as_deref().unwrap_or(UNKNOWN_SENDER),
            email.subject.as_deref().unwrap_or(NO_SUBJECT),
            email.summary.as_deref().unwrap_or(NO_SUMMARY),
        ));
    }
    formatted
}

/// Renders a drafted reply followed by the send prompt.
pub fn reply_draft(draft: &ReplyDraft) -> String {
    format!(
        "✅ Reply generated:\n\n{}\n\nWould you like to send this?",
        draft.reply
    )
}

/// Renders the delete status verbatim.
pub fn delete_outcome(outcome: &DeleteOutcome) -> String {
    outcome.status.clone()
}
