// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!             GeniusError (~24 bytes)
//!                     |
//!      +---------+---------+---------+---------+
//!      |         |         |         |         |
//!      v         v         v         v         v
//!     Git     Remote     State   Workflow   Config/Other
//!     Box      Box        Box       Box        Box
//!
//! Sub-errors (unboxed internally):
//!   Git       GitNotFound, SpawnFailed, CommandFailed
//!   Remote    Unauthorized, NotFound, RateLimited, Api, InvalidName, Transport
//!   State     Io, Serialize
//!   Workflow  preconditions, step failures, remote failures
//!   Config    ParseError, InvalidValue
//! ```
//!
//! User-declined confirmations are not errors: workflows report them as a
//! `Declined` outcome.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`GeniusError`].
pub type GeniusResult<T> = std::result::Result<T, GeniusError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum GeniusError {
    /// Git invocation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Remote hosting API call failed.
    #[error("remote error: {0}")]
    Remote(#[from] Box<RemoteError>),

    /// Persisted state could not be written.
    #[error("state error: {0}")]
    State(#[from] Box<StateError>),

    /// Workflow precondition or step failure.
    #[error("{0}")]
    Workflow(#[from] Box<WorkflowError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl GeniusError {
    /// Returns the workflow error, if this is one.
    #[must_use]
    pub fn as_workflow(&self) -> Option<&WorkflowError> {
        match self {
            Self::Workflow(err) => Some(err),
            _ => None,
        }
    }

    /// Whether this failure belongs in the audit log.
    ///
    /// Precondition failures are reported to the operator only; tool and
    /// remote failures are recorded.
    #[must_use]
    pub fn is_auditable(&self) -> bool {
        match self {
            Self::Workflow(err) => !err.is_precondition(),
            Self::Other(_) => false,
            _ => true,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for GeniusError {
                fn from(err: $error) -> Self {
                    GeniusError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    RemoteError => Remote,
    StateError => State,
    WorkflowError => Workflow,
    ConfigError => Config,
}

// --- Git Errors ---

/// Git invocation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git executable could not be located on `PATH`.
    #[error("git executable not found in PATH")]
    GitNotFound,

    /// The git process could not be started.
    #[error("failed to run git in {dir}: {source}")]
    SpawnFailed {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    /// Git exited with a non-zero status.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

// --- Remote Errors ---

/// Remote hosting API errors.
///
/// Maps the hosting API's responses onto authorization, not-found,
/// rate-limit and transport failures.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Credential rejected (401/403 without rate-limit headers).
    #[error("authorization failed ({status}) for {url}")]
    Unauthorized { status: u16, url: String },

    /// Resource does not exist or is hidden from the credential.
    #[error("not found: {url}")]
    NotFound { url: String },

    /// API rate limit exhausted.
    #[error("rate limit exceeded for {url}")]
    RateLimited { url: String },

    /// Any other unexpected status.
    #[error("api error {status}: {url}")]
    Api { status: u16, url: String },

    /// Owner or repository name outside GitHub's charset.
    #[error("invalid GitHub {what} name: '{value}'")]
    InvalidName { what: &'static str, value: String },

    /// Request never completed (DNS, TLS, timeout, decoding).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

// --- State Errors ---

/// Persisted state errors (configuration record, credential, log).
#[derive(Debug, Error)]
pub enum StateError {
    /// Filesystem access failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Record could not be serialized.
    #[error("failed to serialize workflow state: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An empty secret was offered to the credential store.
    #[error("refusing to store an empty credential")]
    EmptyCredential,
}

// --- Workflow Errors ---

/// Workflow precondition and step failures.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The project directory is not a repository and init was not possible.
    #[error("a git repository is required in {path}")]
    RepositoryRequired { path: String },

    /// A required value was not supplied.
    #[error("{what} cannot be empty")]
    MissingInput { what: &'static str },

    /// No access token is configured.
    #[error("GitHub token not configured")]
    MissingCredential,

    /// The session is offline and the step needs the network.
    #[error("offline: cannot reach the remote hosting API")]
    Offline,

    /// The path is not an existing directory.
    #[error("invalid directory path: {path}")]
    InvalidDirectory { path: String },

    /// A GitHub owner or repository name with characters GitHub rejects.
    #[error("invalid {what}: '{value}'")]
    InvalidName { what: &'static str, value: String },

    /// Initializing the repository failed.
    #[error("failed to initialize git repository: {message}")]
    InitFailed { message: String },

    /// Creating a commit failed.
    #[error("commit failed: {message}")]
    CommitFailed { message: String },

    /// Pushing failed. The local commit is kept.
    #[error("push to {remote}/{branch} failed: {message}")]
    PushFailed {
        remote: String,
        branch: String,
        message: String,
    },

    /// Pulling failed; `stash_restored` reports the compensation result.
    #[error("pull from {remote}/{branch} failed: {message}")]
    PullFailed {
        remote: String,
        branch: String,
        message: String,
        stash_restored: Option<bool>,
    },

    /// Any other single git step failed.
    #[error("{step} failed: {message}")]
    StepFailed { step: &'static str, message: String },

    /// Stashing local changes failed; nothing else was attempted.
    #[error("failed to auto-stash changes: {message}")]
    StashFailed { message: String },

    /// A second auto-stash was requested within one operation.
    #[error("an auto-stash is already held by this operation")]
    StashSlotOccupied,

    /// Branch reconciliation could not reach agreement.
    #[error("branch reconciliation failed: {message}")]
    ReconcileFailed { message: String },

    /// The repository existence check failed.
    #[error("failed to check {owner}/{repo} on GitHub: {message}")]
    RemoteCheckFailed {
        owner: String,
        repo: String,
        message: String,
        causes: Vec<String>,
    },

    /// Creating the remote repository failed.
    #[error("failed to create {owner}/{repo} on GitHub: {message}")]
    RepoCreationFailed {
        owner: String,
        repo: String,
        message: String,
        causes: Vec<String>,
    },

    /// The access token was rejected during setup.
    #[error("invalid GitHub token: {message}")]
    InvalidCredential { message: String },
}

impl WorkflowError {
    /// Whether this is a precondition failure rather than a step failure.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::RepositoryRequired { .. }
                | Self::MissingInput { .. }
                | Self::MissingCredential
                | Self::Offline
                | Self::InvalidDirectory { .. }
                | Self::InvalidName { .. }
        )
    }

    /// Likely causes to show the operator, if the failure has any.
    #[must_use]
    pub fn causes(&self) -> &[String] {
        match self {
            Self::RemoteCheckFailed { causes, .. } | Self::RepoCreationFailed { causes, .. } => {
                causes
            }
            _ => &[],
        }
    }
}

// --- Config Errors ---

/// Application settings errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse a settings source.
    #[error("failed to parse settings: {message}")]
    ParseError { message: String },

    /// Invalid settings value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
