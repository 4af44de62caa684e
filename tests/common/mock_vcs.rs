//! Scripted `Vcs` implementation for tests.
//!
//! Manually implemented rather than generated: the walker cares about call
//! order and about which environment target a merge/cherry-pick ran against,
//! so the mock tracks the "current branch" the way a real checkout would.

#![allow(dead_code)]

use pr_cascade::error::{Error, Result};
use pr_cascade::vcs::{ApplyOutcome, Vcs};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Configurable in-memory stand-in for the git CLI.
///
/// Defaults to a healthy repository: every remote branch exists, every
/// commit resolves, nothing conflicts, pushes succeed.
#[derive(Debug, Default)]
pub struct MockVcs {
    // Behavior configuration
    absent_remote_branches: Mutex<Vec<String>>,
    absent_commits: Mutex<HashSet<String>>,
    fail_fetch_branches: Mutex<HashSet<String>>,
    fail_push: Mutex<bool>,
    conflict_merge_targets: Mutex<HashSet<String>>,
    conflict_cherry_picks: Mutex<HashSet<(String, String)>>,
    uncommitted_changes: Mutex<bool>,
    not_a_repository: Mutex<bool>,
    subjects: Mutex<HashMap<String, Vec<String>>>,
    commit_subjects: Mutex<HashMap<String, String>>,

    // Checkout bookkeeping
    branch_starts: Mutex<HashMap<String, String>>,
    current_branch: Mutex<Option<String>>,

    // Call tracking
    created_branches: Mutex<Vec<(String, String)>>,
    pushed_branches: Mutex<Vec<String>>,
    merge_calls: Mutex<Vec<String>>,
    cherry_pick_calls: Mutex<Vec<(String, String)>>,
    merge_aborts: Mutex<usize>,
    cherry_pick_aborts: Mutex<usize>,
    fetched_branches: Mutex<Vec<String>>,
    checkouts: Mutex<Vec<String>>,
}

impl MockVcs {
    pub fn new() -> Self {
        Self::default()
    }

    // === Behavior configuration ===

    /// Treat any branch whose name contains `fragment` as missing remotely.
    pub fn absent_remote_branch(&self, fragment: &str) {
        self.absent_remote_branches
            .lock()
            .unwrap()
            .push(fragment.to_string());
    }

    /// Undo [`absent_remote_branch`](Self::absent_remote_branch) entries
    /// containing `fragment` (simulates the operator pushing the branch).
    pub fn restore_remote_branch(&self, fragment: &str) {
        self.absent_remote_branches
            .lock()
            .unwrap()
            .retain(|f| !f.contains(fragment));
    }

    pub fn absent_commit(&self, hash: &str) {
        self.absent_commits.lock().unwrap().insert(hash.to_string());
    }

    /// Make `git fetch origin <branch>` fail for this branch.
    pub fn fail_fetch_of(&self, branch: &str) {
        self.fail_fetch_branches
            .lock()
            .unwrap()
            .insert(branch.to_string());
    }

    pub fn fail_push(&self) {
        *self.fail_push.lock().unwrap() = true;
    }

    /// Conflict every merge onto a branch created from `target`.
    pub fn conflict_on_merge(&self, target: &str) {
        self.conflict_merge_targets
            .lock()
            .unwrap()
            .insert(target.to_string());
    }

    /// Conflict cherry-picking `hash` onto a branch created from `target`.
    pub fn conflict_on_cherry_pick(&self, target: &str, hash: &str) {
        self.conflict_cherry_picks
            .lock()
            .unwrap()
            .insert((target.to_string(), hash.to_string()));
    }

    pub fn set_uncommitted_changes(&self, dirty: bool) {
        *self.uncommitted_changes.lock().unwrap() = dirty;
    }

    pub fn not_a_repository(&self) {
        *self.not_a_repository.lock().unwrap() = true;
    }

    /// Subjects reported for `origin/<target>..origin/<base>`.
    pub fn set_subjects(&self, target: &str, subjects: &[&str]) {
        self.subjects.lock().unwrap().insert(
            target.to_string(),
            subjects.iter().map(ToString::to_string).collect(),
        );
    }

    pub fn set_commit_subject(&self, hash: &str, subject: &str) {
        self.commit_subjects
            .lock()
            .unwrap()
            .insert(hash.to_string(), subject.to_string());
    }

    // === Call verification ===

    /// `(branch name, created from)` pairs, in creation order.
    pub fn get_created_branches(&self) -> Vec<(String, String)> {
        self.created_branches.lock().unwrap().clone()
    }

    pub fn get_pushed_branches(&self) -> Vec<String> {
        self.pushed_branches.lock().unwrap().clone()
    }

    /// `(target, hash)` pairs for every cherry-pick attempted.
    pub fn get_cherry_pick_calls(&self) -> Vec<(String, String)> {
        self.cherry_pick_calls.lock().unwrap().clone()
    }

    pub fn merge_abort_count(&self) -> usize {
        *self.merge_aborts.lock().unwrap()
    }

    pub fn cherry_pick_abort_count(&self) -> usize {
        *self.cherry_pick_aborts.lock().unwrap()
    }

    pub fn get_checkouts(&self) -> Vec<String> {
        self.checkouts.lock().unwrap().clone()
    }

    /// Target the current branch was created from, or empty.
    fn current_target(&self) -> String {
        let current = self.current_branch.lock().unwrap().clone();
        current
            .and_then(|branch| self.branch_starts.lock().unwrap().get(&branch).cloned())
            .unwrap_or_default()
    }
}

impl Vcs for MockVcs {
    fn remote_branch_exists(&self, branch: &str) -> bool {
        !self
            .absent_remote_branches
            .lock()
            .unwrap()
            .iter()
            .any(|fragment| branch.contains(fragment.as_str()))
    }

    fn fetch_all(&self) {}

    fn current_branch(&self) -> Option<String> {
        self.current_branch.lock().unwrap().clone()
    }

    fn pull_current_branch(&self) {}

    fn is_repository(&self) -> bool {
        !*self.not_a_repository.lock().unwrap()
    }

    fn has_uncommitted_changes(&self) -> bool {
        *self.uncommitted_changes.lock().unwrap()
    }

    fn commit_exists(&self, hash: &str) -> bool {
        !self.absent_commits.lock().unwrap().contains(hash)
    }

    fn commit_subject(&self, hash: &str) -> Result<String> {
        Ok(self
            .commit_subjects
            .lock()
            .unwrap()
            .get(hash)
            .cloned()
            .unwrap_or_else(|| format!("commit {hash}")))
    }

    fn subjects_between(&self, _base: &str, target: &str) -> Vec<String> {
        self.subjects
            .lock()
            .unwrap()
            .get(target)
            .cloned()
            .unwrap_or_default()
    }

    fn fetch_branch(&self, branch: &str) -> Result<()> {
        self.fetched_branches
            .lock()
            .unwrap()
            .push(branch.to_string());
        if self.fail_fetch_branches.lock().unwrap().contains(branch) {
            return Err(Error::Git(format!("could not fetch origin/{branch}")));
        }
        Ok(())
    }

    fn create_branch_from_remote(&self, name: &str, start: &str) -> Result<()> {
        self.created_branches
            .lock()
            .unwrap()
            .push((name.to_string(), start.to_string()));
        self.branch_starts
            .lock()
            .unwrap()
            .insert(name.to_string(), start.to_string());
        *self.current_branch.lock().unwrap() = Some(name.to_string());
        Ok(())
    }

    fn merge_no_ff(&self, _base: &str) -> Result<ApplyOutcome> {
        let target = self.current_target();
        self.merge_calls.lock().unwrap().push(target.clone());
        if self.conflict_merge_targets.lock().unwrap().contains(&target) {
            Ok(ApplyOutcome::Conflicted(
                "CONFLICT (content): Merge conflict in src/app.rs".to_string(),
            ))
        } else {
            Ok(ApplyOutcome::Clean)
        }
    }

    fn merge_abort(&self) {
        *self.merge_aborts.lock().unwrap() += 1;
    }

    fn cherry_pick(&self, hash: &str) -> Result<ApplyOutcome> {
        let target = self.current_target();
        self.cherry_pick_calls
            .lock()
            .unwrap()
            .push((target.clone(), hash.to_string()));
        if self
            .conflict_cherry_picks
            .lock()
            .unwrap()
            .contains(&(target, hash.to_string()))
        {
            Ok(ApplyOutcome::Conflicted(format!(
                "error: could not apply {hash}"
            )))
        } else {
            Ok(ApplyOutcome::Clean)
        }
    }

    fn cherry_pick_abort(&self) {
        *self.cherry_pick_aborts.lock().unwrap() += 1;
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.checkouts.lock().unwrap().push(branch.to_string());
        *self.current_branch.lock().unwrap() = Some(branch.to_string());
        Ok(())
    }

    fn push_with_upstream(&self, branch: &str) -> Result<()> {
        if *self.fail_push.lock().unwrap() {
            return Err(Error::Git(format!("failed to push origin/{branch}")));
        }
        self.pushed_branches
            .lock()
            .unwrap()
            .push(branch.to_string());
        Ok(())
    }
}
