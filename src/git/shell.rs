// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;
use tracing::{debug, trace};

use super::{GitOutput, RemoteCredential, VcsGateway};
use crate::error::{GeniusResult, GitError};

/// Environment variable carrying the token to the credential helper.
const TOKEN_ENV: &str = "GENIUS_GIT_TOKEN";

/// Inline helper answering `get` from [`TOKEN_ENV`] and ignoring `store`
/// and `erase`.
const CREDENTIAL_HELPER: &str = "!f() { if [ \"$1\" = get ]; then \
echo username=x-access-token; echo \"password=${GENIUS_GIT_TOKEN}\"; fi; }; f";

/// Whether git may ask the operator on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prompting {
    Allowed,
    Disabled,
}

/// Gateway backed by the git CLI found on `PATH`.
///
/// The executable is resolved once and cached. Local commands run with
/// `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`. Remote commands
/// without a credential may prompt on the terminal; with one, git reads the
/// token through an inline credential helper and the token never appears on
/// the command line.
#[derive(Debug, Clone, Default)]
pub struct ShellGateway {
    program: OnceLock<Option<PathBuf>>,
    envs: Vec<(OsString, OsString)>,
}

impl ShellGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra environment for every git child (e.g. `GIT_CONFIG_GLOBAL`).
    #[must_use]
    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Path of the git executable.
    ///
    /// # Errors
    ///
    /// Returns `GitError::GitNotFound` when git is not on `PATH`.
    pub fn program(&self) -> GeniusResult<&Path> {
        self.program
            .get_or_init(|| which::which("git").ok())
            .as_deref()
            .ok_or_else(|| GitError::GitNotFound.into())
    }

    fn execute(
        &self,
        dir: &Path,
        args: &[&str],
        prompting: Prompting,
        token: Option<&str>,
    ) -> GeniusResult<GitOutput> {
        let program = self.program()?;
        debug!(dir = %dir.display(), args = ?args, ?prompting, "git");

        let mut command = Command::new(program);
        command.args(args).current_dir(dir);
        if prompting == Prompting::Disabled {
            command
                .env("GCM_INTERACTIVE", "never")
                .env("GIT_TERMINAL_PROMPT", "0");
        }
        if let Some(token) = token {
            command.env(TOKEN_ENV, token);
        }
        let output = command
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .output()
            .map_err(|source| GitError::SpawnFailed {
                dir: dir.display().to_string(),
                source,
            })?;

        let out = GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        };
        trace!(success = out.success, stdout = %out.stdout, stderr = %out.stderr, "git finished");
        Ok(out)
    }
}

impl VcsGateway for ShellGateway {
    fn run(&self, dir: &Path, args: &[&str]) -> GeniusResult<GitOutput> {
        self.execute(dir, args, Prompting::Disabled, None)
    }

    fn run_remote(
        &self,
        dir: &Path,
        args: &[&str],
        credential: Option<RemoteCredential<'_>>,
    ) -> GeniusResult<GitOutput> {
        let Some(credential) = credential else {
            return self.execute(dir, args, Prompting::Allowed, None);
        };

        // An empty value clears the helpers configured so far for this host.
        let key = format!("credential.{}.helper", credential.host.trim_end_matches('/'));
        let reset = format!("{key}=");
        let helper = format!("{key}={CREDENTIAL_HELPER}");
        let mut scoped = vec!["-c", reset.as_str(), "-c", helper.as_str()];
        scoped.extend_from_slice(args);
        self.execute(dir, &scoped, Prompting::Disabled, Some(credential.token))
    }
}
