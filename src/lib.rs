// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |            menu / dispatch / options
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |         workflow          |
//!              |  push, pull, link, setup  |
//!              '--+--------+--------+---+--'
//!                 |        |        |   |
//!                 v        v        v   v
//!               git     remote   state  doctor
//!             (shell)  (GitHub)  .git/.genius
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, config, ui |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod doctor;
pub mod error;
pub mod git;
pub mod logging;
pub mod remote;
pub mod state;
pub mod ui;
pub mod workflow;
