// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use colored::Colorize;
use std::io::{BufRead, IsTerminal, Write};

use super::Console;

/// Prompt text for a value that echoes while it is typed.
pub(super) fn secret_label(prompt: &str) -> String {
    format!("{prompt} (visible while typing)")
}

/// Fixed-width stand-in for an entered secret; empty stays empty.
pub(super) fn mask_secret(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        "*".repeat(8)
    }
}

/// Interactive console on stdin/stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConsole {
    assume_yes: bool,
}

impl TerminalConsole {
    #[must_use]
    pub const fn new() -> Self {
        Self { assume_yes: false }
    }

    /// Answer every confirmation with yes without asking.
    #[must_use]
    pub const fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// One trimmed line from stdin, `None` on EOF or read error.
    fn read_line() -> Option<String> {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn prompt(label: &str) {
        print!("{}", format!("{label}: ").cyan().bold());
        let _ = std::io::stdout().flush();
    }
}

impl Console for TerminalConsole {
    fn header(&self, title: &str) {
        println!();
        println!("{}", format!("==== {title} ====").magenta().bold());
    }

    fn info(&self, message: &str) {
        println!("{} {message}", "ℹ".blue().bold());
    }

    fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    fn success(&self, message: &str) {
        println!("{} {}", "✔".green().bold(), message.green());
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "✖".red().bold(), message.red());
    }

    fn output(&self, text: &str) {
        if !text.is_empty() {
            println!("{text}");
        }
    }

    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            println!("{} {}", format!("{question} (y/N):").yellow().bold(), "y");
            return true;
        }
        loop {
            print!("{}", format!("{question} (y/N): ").yellow().bold());
            let _ = std::io::stdout().flush();
            let Some(answer) = Self::read_line() else {
                println!();
                return false;
            };
            match answer.to_lowercase().as_str() {
                "" | "n" | "no" => return false,
                "y" | "yes" => return true,
                _ => println!("{}", "Please enter y or n.".red()),
            }
        }
    }

    fn input(&self, prompt: &str) -> String {
        Self::prompt(prompt);
        Self::read_line().unwrap_or_default()
    }

    /// Reads like [`Console::input`], then overwrites the echoed line with
    /// a mask so the value does not stay in the scrollback.
    fn secret(&self, prompt: &str) -> String {
        let label = secret_label(prompt);
        Self::prompt(&label);
        let value = Self::read_line().unwrap_or_default();
        if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
            // cursor up one line, clear it, redraw
            print!("\x1b[1A\x1b[2K\r");
            println!("{} {}", format!("{label}:").cyan().bold(), mask_secret(&value));
        }
        value
    }

    fn choose(&self, prompt: &str) -> Option<String> {
        Self::prompt(prompt);
        let choice = Self::read_line();
        if choice.is_none() {
            println!();
        }
        choice
    }
}
