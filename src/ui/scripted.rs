// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::cell::RefCell;
use std::collections::VecDeque;

use super::Console;

/// Kind of a recorded console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Header,
    Info,
    Warn,
    Success,
    Error,
    Output,
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub tone: Tone,
    pub text: String,
}

/// Non-interactive console for tests and scripted runs.
///
/// Confirmations and inputs are answered from queues; an exhausted queue
/// answers "no" and "" respectively. Every line is recorded.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    confirms: RefCell<VecDeque<bool>>,
    inputs: RefCell<VecDeque<String>>,
    transcript: RefCell<Vec<Line>>,
}

impl ScriptedConsole {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_confirms(self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.confirms.borrow_mut().extend(answers);
        self
    }

    #[must_use]
    pub fn with_inputs<S: Into<String>>(self, answers: impl IntoIterator<Item = S>) -> Self {
        self.inputs
            .borrow_mut()
            .extend(answers.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn transcript(&self) -> Vec<Line> {
        self.transcript.borrow().clone()
    }

    /// Texts recorded with `tone`.
    #[must_use]
    pub fn lines(&self, tone: Tone) -> Vec<String> {
        self.transcript
            .borrow()
            .iter()
            .filter(|line| line.tone == tone)
            .map(|line| line.text.clone())
            .collect()
    }

    /// Whether any recorded line contains `needle`.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.transcript
            .borrow()
            .iter()
            .any(|line| line.text.contains(needle))
    }

    /// Queued answers not consumed yet.
    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.confirms.borrow().len() + self.inputs.borrow().len()
    }

    fn record(&self, tone: Tone, text: &str) {
        self.transcript.borrow_mut().push(Line {
            tone,
            text: text.to_string(),
        });
    }
}

impl Console for ScriptedConsole {
    fn header(&self, title: &str) {
        self.record(Tone::Header, title);
    }

    fn info(&self, message: &str) {
        self.record(Tone::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(Tone::Warn, message);
    }

    fn success(&self, message: &str) {
        self.record(Tone::Success, message);
    }

    fn error(&self, message: &str) {
        self.record(Tone::Error, message);
    }

    fn output(&self, text: &str) {
        self.record(Tone::Output, text);
    }

    fn confirm(&self, question: &str) -> bool {
        self.record(Tone::Prompt, question);
        self.confirms.borrow_mut().pop_front().unwrap_or(false)
    }

    fn input(&self, prompt: &str) -> String {
        self.record(Tone::Prompt, prompt);
        self.inputs
            .borrow_mut()
            .pop_front()
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }

    fn secret(&self, prompt: &str) -> String {
        self.input(prompt)
    }

    fn choose(&self, prompt: &str) -> Option<String> {
        self.record(Tone::Prompt, prompt);
        self.inputs
            .borrow_mut()
            .pop_front()
            .map(|s| s.trim().to_string())
    }
}
