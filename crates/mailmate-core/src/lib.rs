//! Core of the mailmate chat client.
//!
//! Classifies chat utterances into inbox commands, keeps the chat transcript,
//! and drives each turn against an abstract [`gateway::EmailGateway`].
//! Nothing in this crate touches the network or the filesystem.

pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod gateway;
pub mod intent;
pub mod session;
pub mod transcript;

// Re-export common types
pub use config::ClientConfig;
pub use controller::{ConversationController, TurnOutcome};
pub use error::MailmateError;
pub use gateway::EmailGateway;
pub use intent::{EmailIndex, Intent, classify};
pub use session::{BootstrapOutcome, Identity, Session, SessionBootstrap};
pub use transcript::{Author, ChatEntry, Transcript, TranscriptSink};
