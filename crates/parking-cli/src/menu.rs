//! Counter menu actions and the rustyline helper that completes them.

use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// What the operator can do at the menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Enter,
    Leave,
    Subscribe,
    Status,
    History,
    Quit,
}

/// Raw input token -> action.
const ACTION_TOKENS: &[(&str, Action)] = &[
    ("1", Action::Enter),
    ("enter", Action::Enter),
    ("2", Action::Leave),
    ("leave", Action::Leave),
    ("3", Action::Subscribe),
    ("subscribe", Action::Subscribe),
    ("4", Action::Status),
    ("status", Action::Status),
    ("5", Action::History),
    ("history", Action::History),
    ("6", Action::Quit),
    ("quit", Action::Quit),
    ("exit", Action::Quit),
    ("q", Action::Quit),
];

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Enter,
        Action::Leave,
        Action::Subscribe,
        Action::Status,
        Action::History,
        Action::Quit,
    ];

    /// Case-insensitive lookup; `None` for anything not in the table.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim().to_lowercase();
        ACTION_TOKENS
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, action)| *action)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Enter => "1.enter",
            Action::Leave => "2.leave",
            Action::Subscribe => "3.subscribe",
            Action::Status => "4.status",
            Action::History => "5.history",
            Action::Quit => "6.quit",
        }
    }
}

/// One-line menu shown before every prompt.
pub fn menu_line() -> String {
    Action::ALL
        .iter()
        .map(Action::label)
        .collect::<Vec<_>>()
        .join("  ")
}

/// Rustyline helper providing completion, highlighting and hints for menu words.
#[derive(Clone)]
pub struct MenuHelper {
    words: Vec<&'static str>,
}

impl MenuHelper {
    pub fn new() -> Self {
        Self {
            words: ACTION_TOKENS
                .iter()
                .map(|(token, _)| *token)
                .filter(|token| token.len() > 1)
                .collect(),
        }
    }
}

impl Helper for MenuHelper {}

impl Completer for MenuHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.is_empty() {
            return Ok((0, vec![]));
        }

        let candidates = self
            .words
            .iter()
            .filter(|word| word.starts_with(line))
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for MenuHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if Action::from_token(line).is_some() {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for MenuHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.len() < 2 {
            return None;
        }

        self.words
            .iter()
            .find(|word| word.starts_with(line) && word.len() > line.len())
            .map(|word| word[line.len()..].to_string())
    }
}

impl Validator for MenuHelper {}
