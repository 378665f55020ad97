//! Console rendering of the chat transcript.

use colored::Colorize;
use mailmate_core::transcript::{Author, ChatEntry, TranscriptSink};

/// Prints transcript changes to stdout.
///
/// A terminal cannot rewrite earlier output, so a replaced placeholder is
/// shown by printing the replacement right after the dimmed placeholder line.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl TranscriptSink for ConsoleSink {
    fn entry_appended(&self, entry: &ChatEntry, pending: bool) {
        match (entry.author, pending) {
            // rustyline already echoed what was typed
            (Author::User, _) => {}
            (Author::Bot, true) => println!("{}", entry.text.bright_black().italic()),
            (Author::Bot, false) => print_bot(entry),
        }
    }

    fn last_replaced(&self, entry: &ChatEntry) {
        print_bot(entry);
    }
}

fn print_bot(entry: &ChatEntry) {
    println!("{}", format!("[{}]", clock(&entry.timestamp)).bright_magenta());
    for line in entry.text.lines() {
        println!("{}", line.bright_blue());
    }
    println!();
}

/// `HH:MM` in local time, or the raw timestamp if it cannot be parsed.
fn clock(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}
