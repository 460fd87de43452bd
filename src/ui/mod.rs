// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Operator-facing console.
//!
//! ```text
//! Console (trait)
//!   ├─ TerminalConsole   stdin/stdout, colored, optional auto-yes
//!   └─ ScriptedConsole   queued answers + recorded transcript
//! ```
//!
//! Diagnostics go through `tracing`; everything the operator is meant to
//! read goes through a `Console`.

mod scripted;
mod terminal;


use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

pub use scripted::{Line, ScriptedConsole, Tone};
pub use terminal::TerminalConsole;

/// Prompts and messages exchanged with the operator.
pub trait Console {
    fn header(&self, title: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    /// Verbatim tool output (status, stash list).
    fn output(&self, text: &str);

    /// Yes/no question, defaulting to no.
    fn confirm(&self, question: &str) -> bool;
    /// Free text, trimmed. Empty when nothing was entered.
    fn input(&self, prompt: &str) -> String;
    /// Like [`Console::input`] for values that must not be echoed back.
    fn secret(&self, prompt: &str) -> String;
    /// Menu selection. `None` once input has ended.
    fn choose(&self, prompt: &str) -> Option<String>;
}

/// Replace `user[:pass]@` credentials in URLs with `***@`.
#[must_use]
pub fn redact_credentials(text: &str) -> Cow<'_, str> {
    static CREDENTIAL: OnceLock<Option<Regex>> = OnceLock::new();
    CREDENTIAL
        .get_or_init(|| Regex::new(r"(?P<scheme>[a-zA-Z][a-zA-Z0-9+.-]*://)[^/@ \t\r\n]+@").ok())
        .as_ref()
        .map_or(Cow::Borrowed(text), |re| re.replace_all(text, "${scheme}***@"))
}
