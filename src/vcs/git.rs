//! `Vcs` implementation backed by the system `git` binary.

use super::{ApplyOutcome, Vcs};
use crate::error::{Error, Result};
use std::process::{Command, Output};
use tracing::debug;

/// Runs git in the process working directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl GitCli {
    /// New runner for the current working directory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run git with `args`, capturing stdout and stderr.
    fn run(self, args: &[&str]) -> Result<Output> {
        debug!(?args, "running git");
        Command::new("git")
            .args(args)
            .output()
            .map_err(|e| Error::Git(format!("failed to run git {}: {e}", args.join(" "))))
    }

    /// Run git; trimmed stdout on zero exit, captured stderr otherwise.
    fn run_checked(self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(Error::Git(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }

    /// Zero-exit check for commands whose failure is ordinary control flow.
    fn succeeds(self, args: &[&str]) -> bool {
        self.run(args).map(|o| o.status.success()).unwrap_or(false)
    }

    /// Combined stdout + stderr of a finished command, trimmed.
    fn combined_output(output: &Output) -> String {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut text = stdout.trim().to_string();
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(stderr);
        }
        text
    }

    /// Run an apply-style command where non-zero exit means conflicts.
    fn apply(self, args: &[&str]) -> Result<ApplyOutcome> {
        let output = self.run(args)?;
        if output.status.success() {
            Ok(ApplyOutcome::Clean)
        } else {
            Ok(ApplyOutcome::Conflicted(Self::combined_output(&output)))
        }
    }
}

impl Vcs for GitCli {
    fn remote_branch_exists(&self, branch: &str) -> bool {
        self.succeeds(&["rev-parse", "--verify", &format!("origin/{branch}")])
    }

    fn fetch_all(&self) {
        let _ = self.run(&["fetch", "--all", "--prune"]);
    }

    fn current_branch(&self) -> Option<String> {
        self.run_checked(&["branch", "--show-current"])
            .ok()
            .filter(|branch| !branch.is_empty())
    }

    fn pull_current_branch(&self) {
        if let Some(branch) = self.current_branch() {
            let _ = self.run(&["pull", "origin", &branch]);
        }
    }

    fn is_repository(&self) -> bool {
        self.succeeds(&["rev-parse", "--git-dir"])
    }

    fn has_uncommitted_changes(&self) -> bool {
        self.run_checked(&["status", "--porcelain"])
            .map(|out| !out.is_empty())
            .unwrap_or(false)
    }

    fn commit_exists(&self, hash: &str) -> bool {
        self.run_checked(&["cat-file", "-t", hash])
            .map(|kind| kind == "commit")
            .unwrap_or(false)
    }

    fn commit_subject(&self, hash: &str) -> Result<String> {
        self.run_checked(&["log", "-1", "--pretty=format:%s", hash])
    }

    fn subjects_between(&self, base: &str, target: &str) -> Vec<String> {
        // Refresh both sides so the range reflects the remote.
        let _ = self.run(&["fetch", "origin", base]);
        let _ = self.run(&["fetch", "origin", target]);

        let range = format!("origin/{target}..origin/{base}");
        match self.run_checked(&["log", &range, "--pretty=format:%s", "--no-merges"]) {
            Ok(out) => out
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            Err(e) => {
                debug!(%e, range, "commit range listing failed");
                Vec::new()
            }
        }
    }

    fn fetch_branch(&self, branch: &str) -> Result<()> {
        self.run_checked(&["fetch", "origin", branch]).map(|_| ())
    }

    fn create_branch_from_remote(&self, name: &str, start: &str) -> Result<()> {
        self.run_checked(&["checkout", "-b", name, &format!("origin/{start}")])
            .map(|_| ())
    }

    fn merge_no_ff(&self, base: &str) -> Result<ApplyOutcome> {
        self.apply(&["merge", "--no-ff", &format!("origin/{base}")])
    }

    fn merge_abort(&self) {
        let _ = self.run(&["merge", "--abort"]);
    }

    fn cherry_pick(&self, hash: &str) -> Result<ApplyOutcome> {
        self.apply(&["cherry-pick", hash])
    }

    fn cherry_pick_abort(&self) {
        let _ = self.run(&["cherry-pick", "--abort"]);
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.run_checked(&["checkout", branch]).map(|_| ())
    }

    fn push_with_upstream(&self, branch: &str) -> Result<()> {
        self.run_checked(&["push", "-u", "origin", branch]).map(|_| ())
    }
}
