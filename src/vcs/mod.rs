//! Version-control operations consumed by the promotion flow.
//!
//! Everything here drives the system `git` binary; `Vcs` is the seam that
//! lets tests substitute a scripted implementation.

mod git;

pub use git::GitCli;

use crate::error::Result;

/// Outcome of applying changes (merge or cherry-pick) onto a staging branch.
///
/// A non-zero exit from `merge`/`cherry-pick` is treated as a conflict; only
/// failing to run git at all surfaces as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Applied cleanly.
    Clean,
    /// The operation hit conflicts; carries captured git output.
    Conflicted(String),
}

impl ApplyOutcome {
    /// Whether this outcome reports conflicts.
    #[must_use]
    pub const fn is_conflicted(&self) -> bool {
        matches!(self, Self::Conflicted(_))
    }
}

/// Git operations used by the walker, builder, gate, and publisher.
///
/// Failures carry captured stderr. Operations documented as best effort
/// swallow errors, matching how the workflow tolerates them.
pub trait Vcs {
    /// Whether `origin/<branch>` resolves.
    fn remote_branch_exists(&self, branch: &str) -> bool;

    /// `git fetch --all --prune`. Best effort.
    fn fetch_all(&self);

    /// Currently checked-out branch, if any (detached HEAD yields `None`).
    fn current_branch(&self) -> Option<String>;

    /// `git pull origin <current branch>`. Best effort.
    fn pull_current_branch(&self);

    /// Whether the working directory is inside a git repository.
    fn is_repository(&self) -> bool;

    /// Whether `git status --porcelain` reports anything.
    fn has_uncommitted_changes(&self) -> bool;

    /// Whether `hash` resolves to a commit object.
    fn commit_exists(&self, hash: &str) -> bool;

    /// Subject line of a single commit.
    fn commit_subject(&self, hash: &str) -> Result<String>;

    /// Subject lines in `origin/<target>..origin/<base>`, excluding merge
    /// commits, in log order. Empty on error.
    fn subjects_between(&self, base: &str, target: &str) -> Vec<String>;

    /// `git fetch origin <branch>`.
    fn fetch_branch(&self, branch: &str) -> Result<()>;

    /// `git checkout -b <name> origin/<start>`.
    fn create_branch_from_remote(&self, name: &str, start: &str) -> Result<()>;

    /// `git merge --no-ff origin/<base>` onto the current branch.
    fn merge_no_ff(&self, base: &str) -> Result<ApplyOutcome>;

    /// `git merge --abort`. Best effort.
    fn merge_abort(&self);

    /// `git cherry-pick <hash>` onto the current branch.
    fn cherry_pick(&self, hash: &str) -> Result<ApplyOutcome>;

    /// `git cherry-pick --abort`. Best effort.
    fn cherry_pick_abort(&self);

    /// `git checkout <branch>`.
    fn checkout(&self, branch: &str) -> Result<()>;

    /// `git push -u origin <branch>`.
    fn push_with_upstream(&self, branch: &str) -> Result<()>;
}
