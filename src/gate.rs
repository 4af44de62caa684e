//! Interactive conflict gate.
//!
//! When branch construction hits conflicts the run pauses here until the
//! operator resolves and pushes, skips the environment, or stops the run.
//! This is the only suspending point in the whole process.

use crate::error::Result;
use crate::progress::Progress;
use crate::types::{ConflictDecision, EnvironmentSpec, RunState, short_hash};
use crate::vcs::Vcs;

/// Source of operator decisions at the conflict gate.
///
/// The CLI implements this with a terminal menu; tests script the answers.
pub trait ConfirmationSource {
    /// Ask the operator what to do about the current conflict.
    fn decide(&self) -> Result<ConflictDecision>;
}

/// What the walker should do after the gate closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Conflicts resolved and pushed; proceed to PR creation.
    Proceed,
    /// Operator skipped this environment.
    Skipped,
    /// Operator stopped the whole run.
    Stopped,
}

/// Walk the operator through conflict resolution for a staging branch.
///
/// Re-attempts the conflicting operation once in the operator's checkout so
/// the conflict markers are present locally, then blocks on a decision. A
/// "resolved" claim is verified (branch on remote, clean working tree)
/// before the gate opens; failed verification re-prompts.
pub fn resolve_conflicts(
    vcs: &dyn Vcs,
    confirm: &dyn ConfirmationSource,
    progress: &dyn Progress,
    state: &RunState,
    env: &EnvironmentSpec,
    staging_branch: &str,
) -> Result<GateOutcome> {
    print_instructions(progress, state, env, staging_branch);

    let _ = vcs.checkout(staging_branch);
    if state.is_cherry_pick() {
        progress.info("Attempting cherry-pick to show conflicts...");
        for hash in &state.cherry_pick_commits {
            match vcs.cherry_pick(hash) {
                Ok(outcome) if !outcome.is_conflicted() => {}
                _ => break,
            }
        }
    } else {
        progress.info("Attempting merge to show conflicts...");
        let _ = vcs.merge_no_ff(&state.base_branch);
    }

    loop {
        match confirm.decide()? {
            ConflictDecision::Resolved => {
                progress.info("Verifying conflict resolution...");
                let _ = vcs.fetch_branch(staging_branch);

                if !vcs.remote_branch_exists(staging_branch) {
                    progress.error(&format!("Branch {staging_branch} not found on remote"));
                    progress.error(&format!("Please push: git push -u origin {staging_branch}"));
                    continue;
                }

                if vcs.has_uncommitted_changes() {
                    progress.warning("You have uncommitted changes");
                    progress.info("Please commit and push all changes");
                    continue;
                }

                progress.success("Conflicts resolved and branch pushed!");
                return Ok(GateOutcome::Proceed);
            }
            ConflictDecision::Skip => {
                progress.warning(&format!("Skipping {} environment", env.name));
                vcs.merge_abort();
                vcs.cherry_pick_abort();
                return Ok(GateOutcome::Skipped);
            }
            ConflictDecision::Stop => {
                progress.warning("Stopping entire process");
                vcs.merge_abort();
                vcs.cherry_pick_abort();
                return Ok(GateOutcome::Stopped);
            }
        }
    }
}

/// Print the exact manual commands that reproduce and resolve the conflict.
fn print_instructions(
    progress: &dyn Progress,
    state: &RunState,
    env: &EnvironmentSpec,
    staging_branch: &str,
) {
    let rule = "=".repeat(70);
    progress.warning(&rule);
    if state.is_cherry_pick() {
        progress.warning("CHERRY-PICK CONFLICT RESOLUTION REQUIRED");
    } else {
        progress.warning("MERGE CONFLICT RESOLUTION REQUIRED");
    }
    progress.warning(&rule);

    progress.plain(&format!("\nEnvironment: {}", env.name));
    progress.plain(&format!("Staging Branch: {staging_branch}"));

    if state.is_cherry_pick() {
        progress.plain("Commits to cherry-pick:");
        for hash in &state.cherry_pick_commits {
            progress.plain(&format!("  - {}", short_hash(hash)));
        }

        progress.plain("\nSteps to resolve:");
        progress.plain(&format!("  1. Checkout: git checkout {staging_branch}"));
        progress.plain("  2. Cherry-pick each commit:");
        for hash in &state.cherry_pick_commits {
            progress.plain(&format!("     git cherry-pick {hash}"));
        }
        progress.plain("  3. Resolve conflicts if any");
        progress.plain("  4. Stage files: git add .");
        progress.plain("  5. Continue: git cherry-pick --continue");
        progress.plain("  6. Repeat for remaining commits");
        progress.plain(&format!("  7. Push: git push -u origin {staging_branch}"));
    } else {
        progress.plain(&format!("Target Branch: {}", env.target_branch));
        progress.plain(&format!("Base Branch: {}", state.base_branch));

        progress.plain("\nSteps to resolve:");
        progress.plain(&format!("  1. Checkout: git checkout {staging_branch}"));
        progress.plain(&format!(
            "  2. Merge: git merge --no-ff origin/{}",
            state.base_branch
        ));
        progress.plain("  3. Resolve conflicts in your editor");
        progress.plain("  4. Stage files: git add .");
        progress.plain("  5. Commit: git commit");
        progress.plain(&format!("  6. Push: git push -u origin {staging_branch}"));
    }
}
