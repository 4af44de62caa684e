//! Staging-branch construction.
//!
//! Each environment gets an isolated branch cut from its target's remote
//! tip, with the change applied either by a no-fast-forward merge of the
//! base branch or by replaying an explicit commit list.

use crate::error::Result;
use crate::progress::Progress;
use crate::types::{EnvironmentSpec, RunState, short_hash};
use crate::vcs::{ApplyOutcome, Vcs};
use chrono::{DateTime, Local};

/// A staging branch produced by the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingBranch {
    /// Branch name, unique per run.
    pub name: String,
    /// Whether applying the change hit conflicts. A conflicted branch
    /// exists locally but was not pushed.
    pub has_conflicts: bool,
}

/// Deterministic staging branch name: sanitized base branch, local `HHMM`,
/// environment suffix.
///
/// Rapid repeated runs within the same minute can collide; accepted
/// limitation, not detected.
#[must_use]
pub fn staging_branch_name(base_branch: &str, suffix: &str, now: &DateTime<Local>) -> String {
    format!(
        "{}-{}-{}",
        base_branch.replace('/', "-"),
        now.format("%H%M"),
        suffix
    )
}

/// Build the staging branch for one environment, per the run's mode.
pub fn build_staging_branch(
    vcs: &dyn Vcs,
    progress: &dyn Progress,
    state: &RunState,
    env: &EnvironmentSpec,
) -> Result<StagingBranch> {
    if state.is_cherry_pick() {
        build_with_cherry_pick(vcs, progress, state, env)
    } else {
        build_with_merge(vcs, progress, &state.base_branch, env)
    }
}

/// Create a branch at the target's remote tip and merge the base into it.
pub fn build_with_merge(
    vcs: &dyn Vcs,
    progress: &dyn Progress,
    base_branch: &str,
    env: &EnvironmentSpec,
) -> Result<StagingBranch> {
    let name = staging_branch_name(base_branch, env.branch_suffix, &Local::now());
    progress.info(&format!(
        "Creating staging branch: {name} (from {}, merging {base_branch})",
        env.target_branch
    ));

    vcs.fetch_branch(env.target_branch)?;
    // The base branch usually came in with the initial fetch --all.
    let _ = vcs.fetch_branch(base_branch);

    vcs.create_branch_from_remote(&name, env.target_branch)?;

    if let ApplyOutcome::Conflicted(details) = vcs.merge_no_ff(base_branch)? {
        progress.warning("Merge conflicts detected during branch creation");
        progress.info(&format!("Conflict details:\n{details}"));
        vcs.merge_abort();
        progress.info("Merge aborted - conflicts must be resolved before pushing");
        return Ok(StagingBranch {
            name,
            has_conflicts: true,
        });
    }

    vcs.push_with_upstream(&name)?;
    Ok(StagingBranch {
        name,
        has_conflicts: false,
    })
}

/// Create a branch at the target's remote tip and replay the run's commits
/// onto it, in order. Stops at the first conflicting commit.
pub fn build_with_cherry_pick(
    vcs: &dyn Vcs,
    progress: &dyn Progress,
    state: &RunState,
    env: &EnvironmentSpec,
) -> Result<StagingBranch> {
    let name = staging_branch_name(&state.base_branch, env.branch_suffix, &Local::now());
    progress.info(&format!(
        "Creating staging branch: {name} (from {}, cherry-picking {} commit(s))",
        env.target_branch,
        state.cherry_pick_commits.len()
    ));

    vcs.fetch_branch(env.target_branch)?;
    vcs.create_branch_from_remote(&name, env.target_branch)?;

    for hash in &state.cherry_pick_commits {
        progress.info(&format!("Cherry-picking {}...", short_hash(hash)));
        if let ApplyOutcome::Conflicted(details) = vcs.cherry_pick(hash)? {
            progress.warning(&format!("Cherry-pick conflict for {}", short_hash(hash)));
            progress.info(&format!("Conflict details:\n{details}"));
            vcs.cherry_pick_abort();
            progress.info("Cherry-pick aborted - conflicts must be resolved before pushing");
            return Ok(StagingBranch {
                name,
                has_conflicts: true,
            });
        }
    }

    vcs.push_with_upstream(&name)?;
    progress.success("All commits cherry-picked successfully");
    Ok(StagingBranch {
        name,
        has_conflicts: false,
    })
}
