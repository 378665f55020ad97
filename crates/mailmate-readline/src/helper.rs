use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use mailmate_core::{Intent, classify};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// Command forms offered for completion and hints.
pub const COMMANDS: [&str; 8] = [
    "read emails",
    "show emails",
    "last 5",
    "reply ",
    "delete ",
    "/help",
    "/logout",
    "quit",
];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }

    fn matching<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        let lowered = line.to_lowercase();
        self.commands
            .iter()
            .filter(move |cmd| !lowered.is_empty() && cmd.starts_with(&lowered))
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        let candidates: Vec<Pair> = self
            .matching(line)
            .map(|cmd| Pair {
                display: cmd.trim_end().to_string(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') || classify(line) != Intent::Unknown {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }

        self.matching(line)
            .find(|cmd| cmd.len() > line.len())
            .and_then(|cmd| cmd.get(line.len()..))
            .map(str::to_string)
    }
}

impl Validator for CliHelper {}
