//! Conversation controller.
//!
//! Every turn moves through `Idle → Submitting → Resolved`:
//!
//! 1. the raw utterance is appended as a user entry,
//! 2. the utterance is classified,
//! 3. a placeholder bot entry is appended (or, for unknown input, the
//!    guidance text is appended as a final entry and the turn ends),
//! 4. the matching gateway operation runs,
//! 5. the placeholder is replaced with the formatted result, or with the
//!    generic failure message if anything went wrong.
//!
//! Failures never escape a turn; the controller is always ready for the next
//! utterance once `submit` returns.

use std::sync::Arc;

use crate::error::Result;
use crate::format;
use crate::gateway::EmailGateway;
use crate::intent::{Intent, classify};
use crate::session::Session;
use crate::transcript::{ChatEntry, Transcript, TranscriptError, TranscriptSink};

/// How a call to [`ConversationController::submit`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Empty or whitespace-only input; nothing changed.
    Empty,
    /// A previous turn is still awaiting its result; nothing changed.
    Busy,
    /// The utterance was not recognized and guidance was shown.
    Guided,
    /// The gateway call succeeded and its result replaced the placeholder.
    Resolved(Intent),
    /// The gateway call failed and the generic failure message replaced the placeholder.
    Failed(Intent),
}

/// Owns the transcript for one signed-in session and drives each chat turn.
pub struct ConversationController {
    gateway: Arc<dyn EmailGateway>,
    session: Session,
    transcript: Transcript,
    sink: Arc<dyn TranscriptSink>,
}

impl ConversationController {
    /// Creates a controller whose transcript holds exactly one welcome entry.
    pub fn start(
        gateway: Arc<dyn EmailGateway>,
        session: Session,
        sink: Arc<dyn TranscriptSink>,
    ) -> std::result::Result<Self, TranscriptError> {
        let mut controller = Self {
            gateway,
            session,
            transcript: Transcript::new(),
            sink,
        };

        let welcome = ChatEntry::bot(format::welcome(&controller.session.display_name));
        controller.append(welcome)?;

        tracing::info!(
            "[Controller] Conversation started for {}",
            controller.session.display_name
        );
        Ok(controller)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// True while a placeholder is waiting for the backend.
    pub fn is_awaiting(&self) -> bool {
        self.transcript.is_awaiting()
    }

    /// Runs one chat turn for `utterance`.
    ///
    /// Returns `Err` only when the transcript invariants are violated, which
    /// indicates a bug rather than a user or backend failure.
    pub async fn submit(
        &mut self,
        utterance: &str,
    ) -> std::result::Result<TurnOutcome, TranscriptError> {
        if utterance.trim().is_empty() {
            return Ok(TurnOutcome::Empty);
        }
        if self.transcript.is_awaiting() {
            tracing::debug!("[Controller] Ignoring input while a request is in flight");
            return Ok(TurnOutcome::Busy);
        }

        self.append(ChatEntry::user(utterance))?;

        let intent = classify(utterance);
        tracing::info!("[Controller] Classified utterance as {}", intent);

        let Some(placeholder) = format::placeholder(&intent) else {
            self.append(ChatEntry::bot(format::UNKNOWN_COMMAND))?;
            return Ok(TurnOutcome::Guided);
        };
        self.append_pending(ChatEntry::bot(placeholder))?;

        let (text, outcome) = match self.resolve(&intent).await {
            Ok(text) => (text, TurnOutcome::Resolved(intent)),
            Err(e) => {
                tracing::warn!("[Controller] {} failed: {}", intent, e);
                (
                    format::GENERIC_FAILURE.to_string(),
                    TurnOutcome::Failed(intent),
                )
            }
        };

        self.replace_last(ChatEntry::bot(text))?;
        Ok(outcome)
    }

    /// Ends the backend session and discards this conversation.
    ///
    /// Returns the redirect target reported by the backend.
    pub async fn logout(self) -> Result<String> {
        tracing::info!("[Controller] Logging out {}", self.session.display_name);
        self.gateway.logout().await
    }

    async fn resolve(&self, intent: &Intent) -> Result<String> {
        match *intent {
            Intent::ListRecent => {
                let listing = self.gateway.list_recent().await?;
                Ok(format::recent_emails(&listing))
            }
            Intent::Reply { index } => {
                let draft = self.gateway.reply(index).await?;
                Ok(format::reply_draft(&draft))
            }
            Intent::Delete { index } => {
                let outcome = self.gateway.delete(index).await?;
                Ok(format::delete_outcome(&outcome))
            }
            Intent::Unknown => Ok(format::UNKNOWN_COMMAND.to_string()),
        }
    }

    fn append(&mut self, entry: ChatEntry) -> std::result::Result<(), TranscriptError> {
        self.transcript.append(entry.clone())?;
        self.sink.entry_appended(&entry, false);
        Ok(())
    }

    fn append_pending(&mut self, entry: ChatEntry) -> std::result::Result<(), TranscriptError> {
        self.transcript.append_pending(entry.clone())?;
        self.sink.entry_appended(&entry, true);
        Ok(())
    }

    fn replace_last(&mut self, entry: ChatEntry) -> std::result::Result<(), TranscriptError> {
        self.transcript.replace_last(entry.clone())?;
        self.sink.last_replaced(&entry);
        Ok(())
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;
