// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tempfile::TempDir;

use super::{
    ChangeDirOutcome, LinkOutcome, PullOutcome, PushOutcome, ReconcileOutcome, SessionContext,
    StashSlot, UndoOutcome, Workflow,
};
use crate::config::Settings;
use crate::error::{GeniusError, GeniusResult, GitError, RemoteError, WorkflowError};
use crate::git::{GitOutput, RemoteCredential, VcsGateway};
use crate::remote::{NewRepository, RemoteHost, RemoteIdentity};
use crate::state::{AuditLog, CredentialStore, StateStore, WorkflowConfig};
use crate::ui::{ScriptedConsole, Tone};

const TOKEN: &str = "ghp_valid";

// --- Fake git ---

/// Repository state the fake gateway simulates.
#[derive(Debug, Clone, Default)]
struct Sim {
    repo: bool,
    head: String,
    commits: Vec<String>,
    dirty: bool,
    remotes: BTreeMap<String, String>,
    stashes: Vec<String>,
    config: BTreeMap<String, String>,
    safe_directories: Vec<String>,
    pushed: Vec<(String, String)>,
    pulled: usize,
    pop_conflicts: bool,
}

impl Sim {
    /// A directory with files but no repository.
    fn bare_directory() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    /// A repository with one commit on `branch` and a configured identity.
    fn committed(branch: &str) -> Self {
        let mut config = BTreeMap::new();
        config.insert("user.name".to_string(), "Dev".to_string());
        config.insert("user.email".to_string(), "dev@example.com".to_string());
        Self {
            repo: true,
            head: branch.to_string(),
            commits: vec!["initial".to_string()],
            config,
            ..Self::default()
        }
    }

    fn with_remote(mut self, name: &str, url: &str) -> Self {
        self.remotes.insert(name.to_string(), url.to_string());
        self
    }

    fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }
}

/// In-memory git that records every invocation.
#[derive(Debug, Default)]
struct FakeGit {
    sim: RefCell<Sim>,
    calls: RefCell<Vec<String>>,
    fail_on: Vec<(&'static str, &'static str)>,
    /// Calls that cannot even be started, after `n` successful matches.
    broken: Vec<(&'static str, usize)>,
    /// Credential offered with each remote command, as `host token`.
    credentials: RefCell<Vec<Option<String>>>,
}

impl FakeGit {
    fn new(sim: Sim) -> Self {
        Self {
            sim: RefCell::new(sim),
            ..Self::default()
        }
    }

    /// Fail every call starting with `prefix`, reporting `stderr`.
    fn failing(mut self, prefix: &'static str, stderr: &'static str) -> Self {
        self.fail_on.push((prefix, stderr));
        self
    }

    /// Spawn failure for calls starting with `prefix`, once `after`
    /// matching calls have gone through.
    fn broken(mut self, prefix: &'static str, after: usize) -> Self {
        self.broken.push((prefix, after));
        self
    }

    fn credentials(&self) -> Vec<Option<String>> {
        self.credentials.borrow().clone()
    }

    fn sim(&self) -> Sim {
        self.sim.borrow().clone()
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn called(&self, prefix: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.starts_with(prefix))
    }

    fn simulate(&self, args: &[&str]) -> GitOutput {
        let mut sim = self.sim.borrow_mut();
        let global = args.get(1) == Some(&"--global");
        if !sim.repo && !global && !matches!(args.first(), Some(&"init" | &"--version")) {
            return GitOutput::failed("fatal: not a git repository");
        }

        match args {
            ["--version"] => GitOutput::ok("git version 2.45.0"),
            ["init"] => {
                sim.repo = true;
                sim.head = "master".to_string();
                GitOutput::ok("Initialized empty Git repository")
            }
            ["rev-parse", "--is-inside-work-tree"] => GitOutput::ok("true"),
            ["rev-parse", "--verify", "--quiet", "HEAD~1"] => {
                if sim.commits.len() > 1 {
                    GitOutput::ok("abc123")
                } else {
                    GitOutput::failed("")
                }
            }
            ["symbolic-ref", "HEAD", reference] => {
                sim.head = reference.trim_start_matches("refs/heads/").to_string();
                GitOutput::ok("")
            }
            ["log", "-1"] => {
                if sim.commits.is_empty() {
                    GitOutput::failed("fatal: your current branch does not have any commits yet")
                } else {
                    GitOutput::ok(format!("commit abc123\n\n    {}", sim.commits[0]))
                }
            }
            ["status", "--porcelain"] => GitOutput::ok(if sim.dirty { " M file.txt" } else { "" }),
            ["status"] => GitOutput::ok(format!("On branch {}", sim.head)),
            ["branch", "--show-current"] => GitOutput::ok(sim.head.clone()),
            ["branch", "-m", name] | ["checkout", "-B", name] => {
                sim.head = (*name).to_string();
                GitOutput::ok("")
            }
            ["add", "."] => GitOutput::ok(""),
            ["commit", "-m", message] => {
                if sim.dirty {
                    sim.dirty = false;
                    sim.commits.insert(0, (*message).to_string());
                    GitOutput::ok(format!("[{}] {message}", sim.head))
                } else {
                    GitOutput {
                        success: false,
                        stdout: "nothing to commit, working tree clean".to_string(),
                        stderr: String::new(),
                    }
                }
            }
            ["push", "-u", remote, branch] => {
                if sim.remotes.contains_key(*remote) {
                    sim.pushed.push(((*remote).to_string(), (*branch).to_string()));
                    GitOutput::ok("")
                } else {
                    GitOutput::failed(format!("fatal: '{remote}' does not appear to be a git repository"))
                }
            }
            ["pull", remote, _] => {
                if sim.remotes.contains_key(*remote) {
                    sim.pulled += 1;
                    GitOutput::ok("Fast-forward")
                } else {
                    GitOutput::failed(format!("fatal: '{remote}' does not appear to be a git repository"))
                }
            }
            ["fetch", "--all"] => GitOutput::ok(""),
            ["stash", "push", rest @ ..] => {
                if sim.dirty {
                    let label = rest
                        .iter()
                        .position(|a| *a == "-m")
                        .and_then(|i| rest.get(i + 1))
                        .map_or_else(|| "WIP".to_string(), |m| (*m).to_string());
                    sim.stashes.insert(0, label);
                    sim.dirty = false;
                    GitOutput::ok("Saved working directory and index state")
                } else {
                    GitOutput::ok("No local changes to save")
                }
            }
            ["stash", "list"] => GitOutput::ok(
                sim.stashes
                    .iter()
                    .enumerate()
                    .map(|(i, label)| format!("stash@{{{i}}}: On {}: {label}", sim.head))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            ["stash", "pop"] => {
                if sim.stashes.is_empty() {
                    GitOutput::failed("No stash entries found.")
                } else if sim.pop_conflicts {
                    sim.dirty = true;
                    GitOutput::failed("CONFLICT (content): Merge conflict in file.txt")
                } else {
                    sim.stashes.remove(0);
                    sim.dirty = true;
                    GitOutput::ok("Dropped refs/stash@{0}")
                }
            }
            ["remote", "get-url", name] => match sim.remotes.get(*name) {
                Some(url) => GitOutput::ok(url.clone()),
                None => GitOutput::failed(format!("error: No such remote '{name}'")),
            },
            ["remote", "remove", name] => {
                if sim.remotes.remove(*name).is_some() {
                    GitOutput::ok("")
                } else {
                    GitOutput::failed(format!("error: No such remote: '{name}'"))
                }
            }
            ["remote", "add", name, url] => {
                if sim.remotes.contains_key(*name) {
                    GitOutput::failed(format!("error: remote {name} already exists."))
                } else {
                    sim.remotes.insert((*name).to_string(), (*url).to_string());
                    GitOutput::ok("")
                }
            }
            ["config", "--global", "--get-all", "safe.directory"] => {
                if sim.safe_directories.is_empty() {
                    GitOutput::failed("")
                } else {
                    GitOutput::ok(sim.safe_directories.join("\n"))
                }
            }
            ["config", "--global", "--add", "safe.directory", dir] => {
                sim.safe_directories.push((*dir).to_string());
                GitOutput::ok("")
            }
            ["config", "--get", key] => match sim.config.get(*key) {
                Some(value) => GitOutput::ok(value.clone()),
                None => GitOutput::failed(""),
            },
            ["config", key, value] => {
                sim.config.insert((*key).to_string(), (*value).to_string());
                GitOutput::ok("")
            }
            ["reset", "--soft", "HEAD~1"] => {
                sim.commits.remove(0);
                sim.dirty = true;
                GitOutput::ok("")
            }
            ["update-ref", "-d", "HEAD"] => {
                sim.commits.clear();
                sim.dirty = true;
                GitOutput::ok("")
            }
            _ => GitOutput::failed(format!("unsupported: git {}", args.join(" "))),
        }
    }
}

impl VcsGateway for FakeGit {
    fn run(&self, dir: &Path, args: &[&str]) -> GeniusResult<GitOutput> {
        let command = args.join(" ");
        self.calls.borrow_mut().push(command.clone());
        for (prefix, after) in &self.broken {
            let seen = self
                .calls
                .borrow()
                .iter()
                .filter(|c| c.starts_with(prefix))
                .count();
            if seen > *after {
                return Err(GitError::SpawnFailed {
                    dir: dir.display().to_string(),
                    source: std::io::Error::other("resource temporarily unavailable"),
                }
                .into());
            }
        }
        if let Some((_, stderr)) = self.fail_on.iter().find(|(p, _)| command.starts_with(p)) {
            return Ok(GitOutput::failed(*stderr));
        }
        Ok(self.simulate(args))
    }

    fn run_remote(
        &self,
        dir: &Path,
        args: &[&str],
        credential: Option<RemoteCredential<'_>>,
    ) -> GeniusResult<GitOutput> {
        self.credentials
            .borrow_mut()
            .push(credential.map(|c| format!("{} {}", c.host, c.token)));
        self.run(dir, args)
    }
}

// --- Fake host ---

#[derive(Debug, Default)]
struct FakeHost {
    login: String,
    existing: RefCell<BTreeSet<String>>,
    check_fails: bool,
    create_fails: bool,
    created: RefCell<Vec<NewRepository>>,
}

impl FakeHost {
    fn new(login: &str) -> Self {
        Self {
            login: login.to_string(),
            ..Self::default()
        }
    }

    fn with_existing(self, full_name: &str) -> Self {
        self.existing.borrow_mut().insert(full_name.to_string());
        self
    }

    fn authorize(token: &str, url: &str) -> GeniusResult<()> {
        if token == TOKEN {
            Ok(())
        } else {
            Err(RemoteError::Unauthorized {
                status: 401,
                url: url.to_string(),
            }
            .into())
        }
    }
}

impl RemoteHost for FakeHost {
    fn web_url(&self) -> &str {
        "https://github.com"
    }

    async fn current_identity(&self, token: &str) -> GeniusResult<RemoteIdentity> {
        Self::authorize(token, "/user")?;
        Ok(RemoteIdentity::User {
            login: self.login.clone(),
        })
    }

    async fn repository_exists(&self, token: &str, owner: &str, repo: &str) -> GeniusResult<bool> {
        Self::authorize(token, "/repos")?;
        if self.check_fails {
            return Err(RemoteError::RateLimited {
                url: format!("/repos/{owner}/{repo}"),
            }
            .into());
        }
        Ok(self.existing.borrow().contains(&format!("{owner}/{repo}")))
    }

    async fn create_repository(&self, token: &str, request: &NewRepository) -> GeniusResult<()> {
        Self::authorize(token, "/user/repos")?;
        if self.create_fails {
            return Err(RemoteError::Api {
                status: 422,
                url: "/user/repos".to_string(),
            }
            .into());
        }
        let owner = request.organization.as_deref().unwrap_or(&self.login);
        self.existing
            .borrow_mut()
            .insert(format!("{owner}/{}", request.name));
        self.created.borrow_mut().push(request.clone());
        Ok(())
    }
}

// --- Fixture ---

struct Fixture {
    temp: TempDir,
    store: StateStore,
    git: FakeGit,
    host: FakeHost,
}

impl Fixture {
    fn new(git: FakeGit) -> Self {
        Self::with_host(git, FakeHost::new("octocat"))
    }

    fn with_host(git: FakeGit, host: FakeHost) -> Self {
        let temp = tempfile::tempdir().expect("failed to create temp dir");
        let store = StateStore::at(temp.path());
        Self {
            temp,
            store,
            git,
            host,
        }
    }

    fn save(&self, config: &WorkflowConfig) {
        self.store.save(config).unwrap();
    }

    fn session(token: Option<&str>) -> SessionContext {
        SessionContext::new(Settings::default(), token.map(str::to_string))
    }

    fn workflow<'a>(
        &'a self,
        console: &'a ScriptedConsole,
        session: SessionContext,
    ) -> Workflow<'a, FakeGit, ScriptedConsole, FakeHost> {
        Workflow::new(&self.git, console, &self.host, &self.store, session)
    }

    fn online<'a>(
        &'a self,
        console: &'a ScriptedConsole,
    ) -> Workflow<'a, FakeGit, ScriptedConsole, FakeHost> {
        self.workflow(console, Self::session(Some(TOKEN)))
    }

    fn audit(&self) -> AuditLog {
        AuditLog::new(self.store.control().clone())
    }

    fn audit_text(&self) -> String {
        std::fs::read_to_string(self.audit().path()).unwrap_or_default()
    }
}

fn workflow_error(err: &GeniusError) -> &WorkflowError {
    err.as_workflow().expect("expected a workflow error")
}

const MUTATING: [&str; 7] = ["add", "commit", "push", "pull", "stash push", "init", "reset"];

// --- Guarded push ---

#[test]
fn test_push_on_fresh_directory_makes_one_commit_and_never_pushes_without_remote() {
    let fx = Fixture::new(FakeGit::new(Sim::bare_directory()));
    let console = ScriptedConsole::new().with_confirms([true]);

    let outcome = fx.online(&console).push(None).unwrap();

    assert_eq!(outcome, PushOutcome::CommittedWithoutRemote);
    let sim = fx.git.sim();
    assert_eq!(sim.commits, vec!["Initial commit".to_string()]);
    assert_eq!(sim.head, "main");
    assert!(!fx.git.called("push"));
    assert!(!fx.store.load().first_push_completed);
    assert!(console.mentions("No remote configured"));
}

#[test]
fn test_push_declined_init_touches_nothing() {
    let fx = Fixture::new(FakeGit::new(Sim::bare_directory()));
    let console = ScriptedConsole::new().with_confirms([false]);

    let outcome = fx.online(&console).push(Some("msg")).unwrap();

    assert_eq!(outcome, PushOutcome::Declined);
    assert!(!fx.git.called("init"));
    assert!(!fx.git.called("commit"));
}

#[test]
fn test_push_on_clean_tree_performs_no_mutation() {
    let fx = Fixture::new(FakeGit::new(
        Sim::committed("main").with_remote("origin", "https://github.com/o/r.git"),
    ));
    let console = ScriptedConsole::new();

    let outcome = fx.online(&console).push(Some("msg")).unwrap();

    assert_eq!(outcome, PushOutcome::NothingToCommit);
    for call in fx.git.calls() {
        assert!(
            !MUTATING.iter().any(|m| call.starts_with(m)),
            "unexpected mutation: git {call}"
        );
    }
    assert!(console.mentions("Nothing to commit"));
}

#[test]
fn test_push_commits_and_pushes_working_branch() {
    let fx = Fixture::new(FakeGit::new(
        Sim::committed("main")
            .dirty()
            .with_remote("origin", "https://github.com/o/r.git"),
    ));
    let console = ScriptedConsole::new().with_inputs(["fix typo"]);

    let outcome = fx.online(&console).push(None).unwrap();

    assert_eq!(
        outcome,
        PushOutcome::Pushed {
            remote: "origin".to_string(),
            branch: "main".to_string(),
        }
    );
    let sim = fx.git.sim();
    assert_eq!(sim.commits[0], "fix typo");
    assert_eq!(sim.pushed, vec![("origin".to_string(), "main".to_string())]);
    assert!(fx.store.load().first_push_completed);
}

#[test]
fn test_push_requires_commit_message_for_later_commits() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main").dirty()));
    let console = ScriptedConsole::new().with_inputs([""]);

    let err = fx.online(&console).push(None).unwrap_err();

    assert!(matches!(
        workflow_error(&err),
        WorkflowError::MissingInput {
            what: "commit message"
        }
    ));
    assert!(!fx.git.called("commit"));
    assert!(!fx.audit().exists());
}

#[test]
fn test_push_failure_keeps_commit_and_audits_redacted_message() {
    let fx = Fixture::new(
        FakeGit::new(
            Sim::committed("main")
                .dirty()
                .with_remote("origin", "https://ghp_secret@github.com/o/r.git"),
        )
        .failing(
            "push",
            "fatal: unable to access 'https://ghp_secret@github.com/o/r.git/'",
        ),
    );
    let console = ScriptedConsole::new();

    let err = fx.online(&console).push(Some("wip")).unwrap_err();

    assert!(matches!(
        workflow_error(&err),
        WorkflowError::PushFailed { .. }
    ));
    assert_eq!(fx.git.sim().commits[0], "wip");
    assert!(!err.to_string().contains("ghp_secret"));
    let log = fx.audit_text();
    assert!(log.contains("git push -u origin main"));
    assert!(log.contains("https://***@github.com"));
    assert!(!log.contains("ghp_secret"));
}

// --- Smart pull ---

#[test]
fn test_smart_pull_declined_stash_touches_nothing() {
    let fx = Fixture::new(FakeGit::new(
        Sim::committed("main")
            .dirty()
            .with_remote("origin", "https://github.com/o/r.git"),
    ));
    let console = ScriptedConsole::new().with_confirms([false]);

    let outcome = fx.online(&console).smart_pull().unwrap();

    assert_eq!(outcome, PullOutcome::Declined);
    assert!(!fx.git.called("stash"));
    assert!(!fx.git.called("pull"));
    assert!(!fx.git.called("commit"));
}

#[test]
fn test_smart_pull_clean_tree_pulls_without_stash() {
    let fx = Fixture::new(FakeGit::new(
        Sim::committed("main").with_remote("origin", "https://github.com/o/r.git"),
    ));
    let console = ScriptedConsole::new();

    let outcome = fx.online(&console).smart_pull().unwrap();

    assert_eq!(
        outcome,
        PullOutcome::Pulled {
            stash_restored: false
        }
    );
    assert!(!fx.git.called("stash push"));
    assert_eq!(fx.git.sim().pulled, 1);
}

#[test]
fn test_smart_pull_stashes_pulls_and_restores() {
    let fx = Fixture::new(FakeGit::new(
        Sim::committed("main")
            .dirty()
            .with_remote("origin", "https://github.com/o/r.git"),
    ));
    let console = ScriptedConsole::new().with_confirms([true]);

    let outcome = fx.online(&console).smart_pull().unwrap();

    assert_eq!(
        outcome,
        PullOutcome::Pulled {
            stash_restored: true
        }
    );
    let sim = fx.git.sim();
    assert!(sim.stashes.is_empty());
    assert!(sim.dirty);
    assert_eq!(sim.pulled, 1);
    assert!(
        fx.git
            .calls()
            .iter()
            .any(|c| c.starts_with("stash push --include-untracked -m genius-auto-stash-"))
    );
}

#[test]
fn test_smart_pull_failure_restores_stash_before_reporting() {
    let fx = Fixture::new(
        FakeGit::new(
            Sim::committed("main")
                .dirty()
                .with_remote("origin", "https://github.com/o/r.git"),
        )
        .failing("pull", "fatal: couldn't find remote ref main"),
    );
    let console = ScriptedConsole::new().with_confirms([true]);

    let err = fx.online(&console).smart_pull().unwrap_err();

    assert!(matches!(
        workflow_error(&err),
        WorkflowError::PullFailed {
            stash_restored: Some(true),
            ..
        }
    ));
    let calls = fx.git.calls();
    let pull = calls.iter().position(|c| c.starts_with("pull")).unwrap();
    let pop = calls.iter().position(|c| c == "stash pop").unwrap();
    assert!(pull < pop);
    assert!(fx.git.sim().stashes.is_empty());
    assert!(fx.audit_text().contains("git pull origin main"));
}

#[test]
fn test_smart_pull_conflicting_restore_is_partial_success() {
    let mut sim = Sim::committed("main")
        .dirty()
        .with_remote("origin", "https://github.com/o/r.git");
    sim.pop_conflicts = true;
    let fx = Fixture::new(FakeGit::new(sim));
    let console = ScriptedConsole::new().with_confirms([true]);

    let outcome = fx.online(&console).smart_pull().unwrap();

    assert_eq!(outcome, PullOutcome::RestoredWithConflicts);
    assert_eq!(fx.git.sim().stashes.len(), 1);
    assert!(!fx.audit().exists());
}

#[test]
fn test_smart_pull_stash_failure_stops_before_pull() {
    let fx = Fixture::new(
        FakeGit::new(
            Sim::committed("main")
                .dirty()
                .with_remote("origin", "https://github.com/o/r.git"),
        )
        .failing("stash push", "error: could not write index"),
    );
    let console = ScriptedConsole::new().with_confirms([true]);

    let err = fx.online(&console).smart_pull().unwrap_err();

    assert!(matches!(
        workflow_error(&err),
        WorkflowError::StashFailed { .. }
    ));
    assert!(!fx.git.called("pull"));
}

#[test]
fn test_smart_pull_that_cannot_start_restores_stash_and_is_audited() {
    let fx = Fixture::new(
        FakeGit::new(
            Sim::committed("main")
                .dirty()
                .with_remote("origin", "https://github.com/o/r.git"),
        )
        .broken("pull", 0),
    );
    let console = ScriptedConsole::new().with_confirms([true]);

    let err = fx.online(&console).smart_pull().unwrap_err();

    match workflow_error(&err) {
        WorkflowError::PullFailed {
            message,
            stash_restored,
            ..
        } => {
            assert_eq!(*stash_restored, Some(true));
            assert!(message.contains("resource temporarily unavailable"));
        }
        other => panic!("expected PullFailed, got {other:?}"),
    }
    let sim = fx.git.sim();
    assert!(sim.stashes.is_empty());
    assert!(sim.dirty);
    assert!(fx.audit_text().contains("git pull origin main"));
}

#[test]
fn test_smart_pull_restores_stash_when_count_is_unreadable() {
    // the count before stashing works, the one after does not
    let fx = Fixture::new(
        FakeGit::new(
            Sim::committed("main")
                .dirty()
                .with_remote("origin", "https://github.com/o/r.git"),
        )
        .broken("stash list", 1),
    );
    let console = ScriptedConsole::new().with_confirms([true]);

    let outcome = fx.online(&console).smart_pull().unwrap();

    assert_eq!(
        outcome,
        PullOutcome::Pulled {
            stash_restored: true
        }
    );
    assert!(fx.git.called("stash pop"));
    assert!(fx.git.sim().stashes.is_empty());
}

#[test]
fn test_smart_pull_unrunnable_pop_is_audited() {
    let fx = Fixture::new(
        FakeGit::new(
            Sim::committed("main")
                .dirty()
                .with_remote("origin", "https://github.com/o/r.git"),
        )
        .broken("stash pop", 0),
    );
    let console = ScriptedConsole::new().with_confirms([true]);

    let err = fx.online(&console).smart_pull().unwrap_err();

    assert!(matches!(err, GeniusError::Git(_)));
    assert_eq!(fx.git.sim().pulled, 1);
    assert!(fx.audit_text().contains("git stash pop"));
}

#[test]
fn test_failed_pull_with_unrunnable_pop_reports_stash_kept() {
    let fx = Fixture::new(
        FakeGit::new(
            Sim::committed("main")
                .dirty()
                .with_remote("origin", "https://github.com/o/r.git"),
        )
        .failing("pull", "fatal: couldn't find remote ref main")
        .broken("stash pop", 0),
    );
    let console = ScriptedConsole::new().with_confirms([true]);

    let err = fx.online(&console).smart_pull().unwrap_err();

    assert!(matches!(
        workflow_error(&err),
        WorkflowError::PullFailed {
            stash_restored: Some(false),
            ..
        }
    ));
    assert_eq!(fx.git.sim().stashes.len(), 1);
    assert!(console.mentions("still in the stash list"));
    assert!(fx.audit_text().contains("git pull origin main"));
}

#[test]
fn test_remote_commands_offer_the_session_token() {
    let fx = Fixture::new(FakeGit::new(
        Sim::committed("main")
            .dirty()
            .with_remote("origin", "https://github.com/o/r.git"),
    ));
    let console = ScriptedConsole::new();
    let workflow = fx.online(&console);

    workflow.push(Some("change")).unwrap();
    workflow.pull().unwrap();
    workflow.fetch().unwrap();

    let expected = Some(format!("https://github.com {TOKEN}"));
    assert_eq!(fx.git.credentials(), vec![expected.clone(), expected.clone(), expected]);
}

#[test]
fn test_remote_commands_without_token_offer_nothing() {
    let fx = Fixture::new(FakeGit::new(
        Sim::committed("main").with_remote("origin", "https://github.com/o/r.git"),
    ));
    let console = ScriptedConsole::new();

    fx.workflow(&console, Fixture::session(None)).fetch().unwrap();

    assert_eq!(fx.git.credentials(), vec![None]);
}

#[test]
fn test_stash_slot_holds_stash_when_count_is_unreadable() {
    let git = FakeGit::new(Sim::committed("main").dirty()).broken("stash list", 1);
    let dir = std::env::temp_dir();
    let mut slot = StashSlot::new("label");

    assert!(slot.push(&git, &dir).unwrap());
    assert!(slot.held().is_some());
    assert_eq!(slot.restore(&git, &dir).unwrap(), Some(true));
}

#[test]
fn test_stash_slot_holds_one_stash() {
    let git = FakeGit::new(Sim::committed("main").dirty());
    let dir = std::env::temp_dir();
    let mut slot = StashSlot::new("label");

    assert!(slot.push(&git, &dir).unwrap());
    assert!(slot.held().is_some_and(|l| l.starts_with("label-")));

    let err = slot.push(&git, &dir).unwrap_err();
    assert!(matches!(
        workflow_error(&err),
        WorkflowError::StashSlotOccupied
    ));

    assert_eq!(slot.restore(&git, &dir).unwrap(), Some(true));
    assert_eq!(slot.restore(&git, &dir).unwrap(), None);
}

#[test]
fn test_stash_slot_stays_empty_when_nothing_to_stash() {
    let git = FakeGit::new(Sim::committed("main"));
    let dir = std::env::temp_dir();
    let mut slot = StashSlot::new("label");

    assert!(!slot.push(&git, &dir).unwrap());
    assert!(slot.held().is_none());
    assert_eq!(slot.restore(&git, &dir).unwrap(), None);
}

// --- Reconciliation ---

#[test]
fn test_reconcile_is_idempotent_once_in_sync() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    let console = ScriptedConsole::new();
    let workflow = fx.online(&console);

    assert_eq!(workflow.reconcile_branch().unwrap(), ReconcileOutcome::InSync);
    assert_eq!(workflow.reconcile_branch().unwrap(), ReconcileOutcome::InSync);
    assert!(console.lines(Tone::Prompt).is_empty());
}

#[test]
fn test_reconcile_without_commits_does_nothing() {
    let mut sim = Sim::committed("master");
    sim.commits.clear();
    let fx = Fixture::new(FakeGit::new(sim));
    let console = ScriptedConsole::new();

    assert_eq!(
        fx.online(&console).reconcile_branch().unwrap(),
        ReconcileOutcome::NoCommits
    );
}

#[test]
fn test_reconcile_renames_branch_on_confirm() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("master")));
    let console = ScriptedConsole::new().with_confirms([true]);

    let outcome = fx.online(&console).reconcile_branch().unwrap();

    assert_eq!(
        outcome,
        ReconcileOutcome::RenamedBranch {
            to: "main".to_string()
        }
    );
    assert_eq!(fx.git.sim().head, "main");
    assert!(console.mentions("Rename git branch to main?"));
}

#[test]
fn test_reconcile_adopts_observed_branch_on_decline() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("master")));
    let console = ScriptedConsole::new().with_confirms([false]);
    let workflow = fx.online(&console);

    let outcome = workflow.reconcile_branch().unwrap();

    assert_eq!(
        outcome,
        ReconcileOutcome::ConfigUpdated {
            branch: "master".to_string()
        }
    );
    assert_eq!(fx.store.load().branch, "master");
    assert_eq!(workflow.reconcile_branch().unwrap(), ReconcileOutcome::InSync);
}

#[test]
fn test_reconcile_falls_back_when_rename_fails() {
    let fx = Fixture::new(
        FakeGit::new(Sim::committed("master"))
            .failing("branch -m", "fatal: a branch named 'main' already exists"),
    );
    let console = ScriptedConsole::new().with_confirms([true]);

    let outcome = fx.online(&console).reconcile_branch().unwrap();

    assert_eq!(
        outcome,
        ReconcileOutcome::ConfigUpdated {
            branch: "master".to_string()
        }
    );
    assert_eq!(fx.store.load().branch, "master");
    assert!(fx.audit_text().contains("git branch -m"));
}

// --- Create or link ---

#[tokio::test]
async fn test_link_twice_keeps_a_single_remote_entry() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    fx.save(&WorkflowConfig {
        owner: "octocat".to_string(),
        repo_name: "widget".to_string(),
        ..WorkflowConfig::default()
    });

    let first_console = ScriptedConsole::new().with_confirms([true, false]);
    let first = fx.online(&first_console).create_or_link(None, None).await;
    let second_console = ScriptedConsole::new();
    let second = fx.online(&second_console).create_or_link(None, None).await;

    let url = "https://github.com/octocat/widget.git".to_string();
    assert_eq!(
        first.unwrap(),
        LinkOutcome::Linked {
            url: url.clone(),
            created: true
        }
    );
    assert_eq!(
        second.unwrap(),
        LinkOutcome::Linked {
            url: url.clone(),
            created: false
        }
    );
    let sim = fx.git.sim();
    assert_eq!(sim.remotes.len(), 1);
    assert_eq!(sim.remotes.get("origin"), Some(&url));
    assert_eq!(fx.host.created.borrow().len(), 1);

    let config = fx.store.load();
    assert!(config.repo_created_remotely);
    assert!(!config.is_organization_owner);
    assert!(!config.private_repo);
}

#[tokio::test]
async fn test_link_creates_under_organisation_when_owner_is_not_login() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    let console = ScriptedConsole::new().with_confirms([true, true]);

    let outcome = fx
        .online(&console)
        .create_or_link(Some("acme"), Some("tools"))
        .await
        .unwrap();

    assert!(matches!(outcome, LinkOutcome::Linked { created: true, .. }));
    let created = fx.host.created.borrow();
    assert_eq!(created[0].organization.as_deref(), Some("acme"));
    assert!(created[0].private);

    let config = fx.store.load();
    assert!(config.is_organization_owner);
    assert_eq!(config.org_name, "acme");
    assert!(config.private_repo);
}

#[tokio::test]
async fn test_link_existing_organisation_repository_records_ownership() {
    let fx = Fixture::with_host(
        FakeGit::new(Sim::committed("main")),
        FakeHost::new("octocat").with_existing("acme/tools"),
    );
    let console = ScriptedConsole::new();

    let outcome = fx
        .online(&console)
        .create_or_link(Some("acme"), Some("tools"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        LinkOutcome::Linked {
            url: "https://github.com/acme/tools.git".to_string(),
            created: false
        }
    );
    assert!(fx.host.created.borrow().is_empty());
    let config = fx.store.load();
    assert!(config.is_organization_owner);
    assert_eq!(config.org_name, "acme");
    assert!(console.mentions("authenticate with the stored GitHub token"));
}

#[tokio::test]
async fn test_link_then_push_authenticates_with_token() {
    let fx = Fixture::with_host(
        FakeGit::new(Sim::committed("main").dirty()),
        FakeHost::new("octocat").with_existing("octocat/widget"),
    );
    let console = ScriptedConsole::new();
    let workflow = fx.online(&console);

    workflow
        .create_or_link(Some("octocat"), Some("widget"))
        .await
        .unwrap();
    let outcome = workflow.push(Some("first change")).unwrap();

    assert!(matches!(outcome, PushOutcome::Pushed { .. }));
    assert_eq!(
        fx.git.credentials(),
        vec![Some(format!("https://github.com {TOKEN}"))]
    );
    let config = fx.store.load();
    assert!(!config.is_organization_owner);
    assert!(config.org_name.is_empty());
}

#[tokio::test]
async fn test_link_rejects_names_outside_github_charset() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));

    for (owner, repo, expected) in [
        ("acme/../orgs", "tools", "owner"),
        ("-acme", "tools", "owner"),
        ("acme", "tools?private=1", "repository name"),
        ("acme", "..", "repository name"),
    ] {
        let console = ScriptedConsole::new();
        let err = fx
            .online(&console)
            .create_or_link(Some(owner), Some(repo))
            .await
            .unwrap_err();

        match workflow_error(&err) {
            WorkflowError::InvalidName { what, .. } => assert_eq!(*what, expected, "{owner}/{repo}"),
            other => panic!("expected InvalidName for {owner}/{repo}, got {other:?}"),
        }
    }
    assert!(!fx.git.called("remote add"));
    assert!(fx.host.created.borrow().is_empty());
    assert!(!fx.audit().exists());
}

#[tokio::test]
async fn test_link_declined_creation_leaves_remotes_alone() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    let console = ScriptedConsole::new().with_confirms([false]);

    let outcome = fx
        .online(&console)
        .create_or_link(Some("octocat"), Some("widget"))
        .await
        .unwrap();

    assert_eq!(outcome, LinkOutcome::Declined);
    assert!(!fx.git.called("remote add"));
    assert!(fx.host.created.borrow().is_empty());
}

#[tokio::test]
async fn test_link_without_token_is_a_precondition_failure() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    let console = ScriptedConsole::new();

    let err = fx
        .workflow(&console, Fixture::session(None))
        .create_or_link(Some("octocat"), Some("widget"))
        .await
        .unwrap_err();

    assert!(matches!(
        workflow_error(&err),
        WorkflowError::MissingCredential
    ));
    assert!(!fx.audit().exists());
}

#[tokio::test]
async fn test_link_offline_is_a_precondition_failure() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    let console = ScriptedConsole::new();
    let mut session = Fixture::session(Some(TOKEN));
    session.online = false;

    let err = fx
        .workflow(&console, session)
        .create_or_link(Some("octocat"), Some("widget"))
        .await
        .unwrap_err();

    assert!(matches!(workflow_error(&err), WorkflowError::Offline));
}

#[tokio::test]
async fn test_link_prompts_for_missing_identity() {
    let fx = Fixture::with_host(
        FakeGit::new(Sim::committed("main")),
        FakeHost::new("octocat").with_existing("octocat/widget"),
    );
    let console = ScriptedConsole::new().with_inputs(["octocat", ""]);

    let err = fx
        .online(&console)
        .create_or_link(None, None)
        .await
        .unwrap_err();

    assert!(matches!(
        workflow_error(&err),
        WorkflowError::MissingInput {
            what: "repository name"
        }
    ));
}

#[tokio::test]
async fn test_link_check_failure_carries_causes_and_is_audited() {
    let mut host = FakeHost::new("octocat");
    host.check_fails = true;
    let fx = Fixture::with_host(FakeGit::new(Sim::committed("main")), host);
    let console = ScriptedConsole::new();

    let err = fx
        .online(&console)
        .create_or_link(Some("octocat"), Some("widget"))
        .await
        .unwrap_err();

    let workflow_err = workflow_error(&err);
    assert!(matches!(
        workflow_err,
        WorkflowError::RemoteCheckFailed { .. }
    ));
    assert_eq!(workflow_err.causes().len(), 3);
    assert!(fx.audit_text().contains("repo exists check failed"));
}

#[tokio::test]
async fn test_link_creation_failure_names_organisation_in_causes() {
    let mut host = FakeHost::new("octocat");
    host.create_fails = true;
    let fx = Fixture::with_host(FakeGit::new(Sim::committed("main")), host);
    let console = ScriptedConsole::new().with_confirms([true, false]);

    let err = fx
        .online(&console)
        .create_or_link(Some("acme"), Some("tools"))
        .await
        .unwrap_err();

    let workflow_err = workflow_error(&err);
    assert!(matches!(
        workflow_err,
        WorkflowError::RepoCreationFailed { .. }
    ));
    assert!(workflow_err.causes()[0].contains("acme"));
    assert!(fx.audit_text().contains("repo creation failed"));
}

// --- Guided setup ---

#[tokio::test]
async fn test_setup_stores_token_creates_repository_and_uses_token_url() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    let basename = fx
        .temp
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    // different dir? / configure token / create / private / push now
    let console = ScriptedConsole::new()
        .with_confirms([false, true, true, false, false])
        .with_inputs(["", "", "octocat", TOKEN]);
    let mut workflow = fx.workflow(&console, Fixture::session(None));

    let summary = workflow.setup().await.unwrap();

    assert_eq!(summary.branch, "main");
    assert_eq!(summary.remote, "origin");
    assert_eq!(
        summary.repository_url,
        format!("https://github.com/octocat/{basename}")
    );
    assert!(!summary.pushed);
    assert_eq!(workflow.session().token.as_deref(), Some(TOKEN));

    let credentials = CredentialStore::new(fx.store.control().clone());
    assert_eq!(credentials.get().as_deref(), Some(TOKEN));
    assert_eq!(
        fx.git.sim().remotes.get("origin"),
        Some(&format!("https://{TOKEN}@github.com/octocat/{basename}.git"))
    );

    let config = fx.store.load();
    assert_eq!(config.owner, "octocat");
    assert_eq!(config.repo_name, basename);
    assert!(config.repo_created_remotely);
    assert_eq!(console.unanswered(), 0);
}

#[tokio::test]
async fn test_setup_prompts_for_missing_git_identity() {
    let mut sim = Sim::committed("main");
    sim.config.clear();
    let fx = Fixture::with_host(
        FakeGit::new(sim),
        FakeHost::new("octocat").with_existing("octocat/widget"),
    );
    fx.save(&WorkflowConfig {
        owner: "octocat".to_string(),
        repo_name: "widget".to_string(),
        ..WorkflowConfig::default()
    });
    // different dir? / configure identity / push now
    let console = ScriptedConsole::new()
        .with_confirms([false, true, false])
        .with_inputs(["Dev", "dev@example.com", "", ""]);
    let mut workflow = fx.workflow(&console, Fixture::session(Some(TOKEN)));

    workflow.setup().await.unwrap();

    let sim = fx.git.sim();
    assert_eq!(sim.config.get("user.name").map(String::as_str), Some("Dev"));
    assert_eq!(
        sim.config.get("user.email").map(String::as_str),
        Some("dev@example.com")
    );
}

#[tokio::test]
async fn test_setup_rejects_invalid_token_and_deletes_it() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    fx.save(&WorkflowConfig {
        owner: "octocat".to_string(),
        repo_name: "widget".to_string(),
        ..WorkflowConfig::default()
    });
    let console = ScriptedConsole::new()
        .with_confirms([false, true])
        .with_inputs(["", "", "ghp_wrong"]);
    let mut workflow = fx.workflow(&console, Fixture::session(None));

    let err = workflow.setup().await.unwrap_err();

    assert!(matches!(
        workflow_error(&err),
        WorkflowError::InvalidCredential { .. }
    ));
    assert!(workflow.session().token.is_none());
    assert!(
        CredentialStore::new(fx.store.control().clone())
            .get()
            .is_none()
    );
    assert!(!fx.git.called("remote add"));
}

#[tokio::test]
async fn test_setup_offline_skips_repository_check() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    fx.save(&WorkflowConfig {
        owner: "octocat".to_string(),
        repo_name: "widget".to_string(),
        ..WorkflowConfig::default()
    });
    let console = ScriptedConsole::new()
        .with_confirms([false, false])
        .with_inputs(["", ""]);
    let mut session = Fixture::session(Some(TOKEN));
    session.online = false;
    let mut workflow = fx.workflow(&console, session);

    let summary = workflow.setup().await.unwrap();

    assert!(!summary.pushed);
    assert!(console.mentions("Offline mode detected"));
    assert!(fx.host.created.borrow().is_empty());
    assert!(fx.git.sim().remotes.contains_key("origin"));
}

#[tokio::test]
async fn test_setup_branch_rename_is_reconciled() {
    let fx = Fixture::with_host(
        FakeGit::new(Sim::committed("main")),
        FakeHost::new("octocat").with_existing("octocat/widget"),
    );
    fx.save(&WorkflowConfig {
        owner: "octocat".to_string(),
        repo_name: "widget".to_string(),
        ..WorkflowConfig::default()
    });
    // different dir? / rename to trunk? / push now
    let console = ScriptedConsole::new()
        .with_confirms([false, true, false])
        .with_inputs(["trunk", "upstream"]);
    let mut workflow = fx.workflow(&console, Fixture::session(Some(TOKEN)));

    let summary = workflow.setup().await.unwrap();

    assert_eq!(summary.branch, "trunk");
    assert_eq!(summary.remote, "upstream");
    assert_eq!(fx.git.sim().head, "trunk");
    assert!(fx.git.sim().remotes.contains_key("upstream"));
}

#[tokio::test]
async fn test_setup_first_push_pushes_to_new_remote() {
    let fx = Fixture::with_host(
        FakeGit::new(Sim::committed("main").dirty()),
        FakeHost::new("octocat").with_existing("octocat/widget"),
    );
    fx.save(&WorkflowConfig {
        owner: "octocat".to_string(),
        repo_name: "widget".to_string(),
        ..WorkflowConfig::default()
    });
    let console = ScriptedConsole::new()
        .with_confirms([false, true])
        .with_inputs(["", "", "first import"]);
    let mut workflow = fx.workflow(&console, Fixture::session(Some(TOKEN)));

    let summary = workflow.setup().await.unwrap();

    assert!(summary.pushed);
    let sim = fx.git.sim();
    assert_eq!(sim.commits[0], "first import");
    assert_eq!(sim.pushed, vec![("origin".to_string(), "main".to_string())]);
    assert!(fx.store.load().first_push_completed);
}

// --- Change project directory ---

#[test]
fn test_change_directory_rejects_missing_path() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    let console = ScriptedConsole::new();

    let err = fx
        .online(&console)
        .change_project_directory(Some("does/not/exist"))
        .unwrap_err();

    assert!(matches!(
        workflow_error(&err),
        WorkflowError::InvalidDirectory { .. }
    ));
    assert!(fx.store.load().project_directory.is_empty());
}

#[test]
fn test_change_directory_initializes_and_prepares_branch() {
    let fx = Fixture::new(FakeGit::new(Sim::bare_directory()));
    std::fs::create_dir(fx.temp.path().join("project")).unwrap();
    let console = ScriptedConsole::new().with_confirms([true]);

    let outcome = fx
        .online(&console)
        .change_project_directory(Some("project"))
        .unwrap();

    assert_eq!(outcome, ChangeDirOutcome::Initialized);
    assert_eq!(fx.git.sim().head, "main");
    let stored = fx.store.load().project_directory;
    assert!(stored.ends_with("project"));
}

#[test]
fn test_change_directory_to_repository_reconciles() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    let console = ScriptedConsole::new();
    let path = fx.temp.path().display().to_string();

    let outcome = fx
        .online(&console)
        .change_project_directory(Some(&path))
        .unwrap();

    assert_eq!(
        outcome,
        ChangeDirOutcome::Repository(ReconcileOutcome::InSync)
    );
}

// --- Branch, remote, stash, undo ---

#[test]
fn test_switch_branch_checks_out_and_persists() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    let console = ScriptedConsole::new().with_inputs(["feature/login"]);

    let branch = fx.online(&console).switch_branch(None).unwrap();

    assert_eq!(branch, "feature/login");
    assert!(fx.git.called("checkout -B feature/login"));
    assert_eq!(fx.store.load().branch, "feature/login");
}

#[test]
fn test_switch_remote_requires_url() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    let console = ScriptedConsole::new().with_inputs([""]);

    let err = fx
        .online(&console)
        .switch_remote(Some("upstream"), None)
        .unwrap_err();

    assert!(matches!(
        workflow_error(&err),
        WorkflowError::MissingInput { what: "remote URL" }
    ));
    assert_eq!(fx.store.load().remote_name, "origin");
}

#[test]
fn test_switch_remote_replaces_and_persists() {
    let fx = Fixture::new(FakeGit::new(
        Sim::committed("main").with_remote("upstream", "https://old.example/r.git"),
    ));
    let console = ScriptedConsole::new();

    fx.online(&console)
        .switch_remote(Some("upstream"), Some("https://new.example/r.git"))
        .unwrap();

    let sim = fx.git.sim();
    assert_eq!(sim.remotes.len(), 1);
    assert_eq!(
        sim.remotes.get("upstream").map(String::as_str),
        Some("https://new.example/r.git")
    );
    assert_eq!(fx.store.load().remote_name, "upstream");
}

#[test]
fn test_stash_save_list_and_pop() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main").dirty()));
    let console = ScriptedConsole::new();
    let workflow = fx.online(&console);

    workflow.stash_save(Some("half done")).unwrap();
    assert_eq!(workflow.stash_list().unwrap(), "stash@{0}: On main: half done");
    workflow.stash_pop().unwrap();

    assert!(fx.git.sim().stashes.is_empty());
    assert!(fx.git.sim().dirty);
}

#[test]
fn test_stash_pop_without_entries_fails() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    let console = ScriptedConsole::new();

    let err = fx.online(&console).stash_pop().unwrap_err();

    assert!(matches!(
        workflow_error(&err),
        WorkflowError::StepFailed {
            step: "stash pop",
            ..
        }
    ));
}

#[test]
fn test_undo_without_commits_is_nothing_to_do() {
    let mut sim = Sim::committed("main");
    sim.commits.clear();
    let fx = Fixture::new(FakeGit::new(sim));
    let console = ScriptedConsole::new();

    assert_eq!(
        fx.online(&console).undo_last_commit().unwrap(),
        UndoOutcome::NothingToDo
    );
    assert!(console.lines(Tone::Prompt).is_empty());
}

#[test]
fn test_undo_soft_resets_and_keeps_changes() {
    let mut sim = Sim::committed("main");
    sim.commits.insert(0, "second".to_string());
    let fx = Fixture::new(FakeGit::new(sim));
    let console = ScriptedConsole::new().with_confirms([true]);

    let outcome = fx.online(&console).undo_last_commit().unwrap();

    assert_eq!(outcome, UndoOutcome::Undone);
    assert!(fx.git.called("reset --soft HEAD~1"));
    let sim = fx.git.sim();
    assert_eq!(sim.commits, vec!["initial".to_string()]);
    assert!(sim.dirty);
}

#[test]
fn test_undo_root_commit_deletes_branch_ref() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    let console = ScriptedConsole::new().with_confirms([true]);

    assert_eq!(
        fx.online(&console).undo_last_commit().unwrap(),
        UndoOutcome::Undone
    );
    assert!(fx.git.called("update-ref -d HEAD"));
    assert!(fx.git.sim().commits.is_empty());
}

#[test]
fn test_undo_declined_keeps_commit() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    let console = ScriptedConsole::new().with_confirms([false]);

    assert_eq!(
        fx.online(&console).undo_last_commit().unwrap(),
        UndoOutcome::Declined
    );
    assert_eq!(fx.git.sim().commits.len(), 1);
}

// --- Status, fetch ---

#[test]
fn test_status_prints_git_output() {
    let fx = Fixture::new(FakeGit::new(Sim::committed("main")));
    let console = ScriptedConsole::new();

    let status = fx.online(&console).status().unwrap();

    assert_eq!(status, "On branch main");
    assert_eq!(console.lines(Tone::Output), vec!["On branch main".to_string()]);
}

#[test]
fn test_operations_require_repository() {
    let fx = Fixture::new(FakeGit::new(Sim::bare_directory()));
    let console = ScriptedConsole::new().with_confirms([false]);

    let err = fx.online(&console).fetch().unwrap_err();

    assert!(matches!(
        workflow_error(&err),
        WorkflowError::RepositoryRequired { .. }
    ));
    assert!(!fx.audit().exists());
}
