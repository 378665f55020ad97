//! Transcript domain module.
//!
//! # Module Structure
//!
//! - `entry`: Chat entry types (`Author`, `ChatEntry`)
//! - `store`: The ordered transcript with its single pending slot (`Transcript`)
//! - `sink`: Render boundary notified of transcript changes (`TranscriptSink`)

mod entry;
mod sink;
mod store;

// Re-export public API
pub use entry::{Author, ChatEntry};
pub use sink::{NullSink, TranscriptSink};
pub use store::{Transcript, TranscriptError};
