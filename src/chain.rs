//! Environment walker: the top-level promotion loop.
//!
//! One environment is processed start to finish before the next begins.
//! A non-conflict build failure halts the chain; a publish failure is
//! recorded and the walk continues; the conflict gate can skip one
//! environment or stop the whole run.

use crate::error::{Error, Result};
use crate::gate::{ConfirmationSource, GateOutcome, resolve_conflicts};
use crate::platform::PlatformService;
use crate::progress::Progress;
use crate::publish::publish;
use crate::staging::build_staging_branch;
use crate::types::{EnvironmentResult, EnvironmentSpec, RunState, short_hash};
use crate::vcs::Vcs;

/// Collaborators for one run, owned by the caller.
pub struct ChainContext<'a> {
    /// Version-control operations.
    pub vcs: &'a dyn Vcs,
    /// Pull-request hosting API.
    pub platform: &'a dyn PlatformService,
    /// Operator decisions at the conflict gate.
    pub confirm: &'a dyn ConfirmationSource,
    /// User-facing status sink.
    pub progress: &'a dyn Progress,
    /// Reviewers to request on every created PR.
    pub reviewers: &'a [String],
}

/// Outcome of a full walk.
#[derive(Debug, Clone, Default)]
pub struct ChainOutcome {
    /// Results for every environment that was processed, in chain order.
    pub results: Vec<EnvironmentResult>,
    /// Whether the operator stopped the run at the conflict gate.
    pub stopped: bool,
}

/// What the walker does after an environment finishes.
enum Disposition {
    Continue,
    Stop,
}

/// Validate prerequisites before building anything.
///
/// Every check runs so the operator sees all problems at once; any failed
/// check is fatal. Uncommitted local changes only warn.
pub fn validate_prerequisites(
    vcs: &dyn Vcs,
    progress: &dyn Progress,
    state: &RunState,
) -> Result<()> {
    progress.header("Validating Prerequisites");

    let mut problems = Vec::new();

    if vcs.remote_branch_exists(&state.base_branch) {
        progress.success(&format!("Base branch '{}' exists", state.base_branch));
    } else {
        progress.error(&format!(
            "Base branch '{}' does not exist",
            state.base_branch
        ));
        problems.push(format!(
            "base branch '{}' not found on remote",
            state.base_branch
        ));
    }

    if state.is_cherry_pick() {
        progress.header("Validating Cherry-Pick Commits");
        for hash in &state.cherry_pick_commits {
            if vcs.commit_exists(hash) {
                let subject = vcs.commit_subject(hash).unwrap_or_default();
                progress.success(&format!("Commit {}: {subject}", short_hash(hash)));
            } else {
                progress.error(&format!("Commit {hash} not found"));
                problems.push(format!("cherry-pick commit {hash} not found"));
            }
        }
    }

    if !vcs.is_repository() {
        progress.error("Not in a git repository");
        problems.push("not in a git repository".to_string());
    }

    if vcs.has_uncommitted_changes() {
        progress.warning("You have uncommitted changes in your working directory");
        progress.info("This won't affect the run, but consider committing them");
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(problems.join("; ")))
    }
}

/// Process a single environment start to finish.
async fn process_environment(
    ctx: &ChainContext<'_>,
    state: &mut RunState,
    envs: &[EnvironmentSpec],
    index: usize,
) -> Result<(EnvironmentResult, Disposition)> {
    let env = &envs[index];
    ctx.progress
        .header(&format!("Processing {} Environment", env.name));

    let mut result = EnvironmentResult::new(env.name);

    let staging = match build_staging_branch(ctx.vcs, ctx.progress, state, env) {
        Ok(staging) => staging,
        Err(e) => {
            ctx.progress.error(&format!(
                "Failed to create staging branch for {}: {e}",
                env.name
            ));
            return Ok((result, Disposition::Continue));
        }
    };

    result.staging_branch = Some(staging.name.clone());
    result.has_conflicts = staging.has_conflicts;

    if staging.has_conflicts {
        match resolve_conflicts(ctx.vcs, ctx.confirm, ctx.progress, state, env, &staging.name)? {
            GateOutcome::Proceed => ctx.progress.success("Ready to create pull request"),
            GateOutcome::Skipped => {
                result.skipped = true;
                return Ok((result, Disposition::Continue));
            }
            GateOutcome::Stopped => return Ok((result, Disposition::Stop)),
        }
    }

    match publish(
        ctx.platform,
        ctx.vcs,
        ctx.progress,
        state,
        envs,
        index,
        &staging.name,
        ctx.reviewers,
    )
    .await
    {
        Ok(created) => {
            result.success = true;
            result.pr_url = Some(created.html_url);
            result.pr_number = Some(created.number);
            state.record_pr(env.name, created.number);
        }
        Err(e) => ctx.progress.error(&format!("Failed to create PR: {e}")),
    }

    Ok((result, Disposition::Continue))
}

/// Walk the configured environments in chain order.
pub async fn run_chain(
    ctx: &ChainContext<'_>,
    state: &mut RunState,
    envs: &[EnvironmentSpec],
) -> Result<ChainOutcome> {
    let mut outcome = ChainOutcome::default();

    for index in 0..envs.len() {
        let (result, disposition) = process_environment(ctx, state, envs, index).await?;
        let build_failed = result.is_build_failure();
        let skipped = result.skipped;
        outcome.results.push(result);

        if matches!(disposition, Disposition::Stop) {
            outcome.stopped = true;
            break;
        }

        if skipped {
            ctx.progress.info("Continuing to next environment...");
            continue;
        }

        if build_failed {
            ctx.progress.warning(&format!(
                "Stopping at {} due to failure",
                envs[index].name
            ));
            break;
        }
    }

    Ok(outcome)
}
