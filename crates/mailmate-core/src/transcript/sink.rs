//! Render boundary for transcript changes.

use super::entry::ChatEntry;

/// Receives every transcript mutation in order.
///
/// The conversation controller is the only writer of the transcript; a sink
/// is the only reader. Implementations decide how entries are shown (console,
/// test recorder, ...) and must not call back into the controller.
pub trait TranscriptSink: Send + Sync {
    /// A new entry was appended. `pending` marks a placeholder that will be
    /// replaced once the backend answers.
    fn entry_appended(&self, entry: &ChatEntry, pending: bool);

    /// The last entry was replaced by `entry`.
    fn last_replaced(&self, entry: &ChatEntry);
}

/// A sink that ignores all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TranscriptSink for NullSink {
    fn entry_appended(&self, _entry: &ChatEntry, _pending: bool) {}

    fn last_replaced(&self, _entry: &ChatEntry) {}
}
