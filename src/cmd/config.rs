// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings-related commands.

use crate::config::Settings;
use crate::ui::Console;

/// Display the effective settings and where they were loaded from.
pub fn run_options_command<C: Console>(console: &C, settings: &Settings, sources: &[String]) {
    for line in settings.format_options() {
        console.output(&line);
    }

    console.header("Settings files");
    if sources.is_empty() {
        console.info("No settings files loaded");
    } else {
        for line in sources {
            console.output(line);
        }
    }
}
