//! Pull-request publishing.
//!
//! Body and title construction are pure functions; `publish` is the
//! effectful step that submits the request and attaches reviewers.

use crate::error::Result;
use crate::platform::{CreatePrRequest, PlatformService};
use crate::progress::Progress;
use crate::types::{CreatedPr, EnvironmentSpec, RunState, short_hash};
use crate::vcs::Vcs;
use chrono::Local;

/// Commit lines listed in a PR body before truncation kicks in.
pub const MAX_LISTED_COMMITS: usize = 10;

/// Placeholder rendered when a merge introduces no new commits.
pub const NO_COMMITS_PLACEHOLDER: &str = "_No new commits to describe_";

/// PR title: `{title_prefix}: {source_reference}`.
#[must_use]
pub fn pr_title(env: &EnvironmentSpec, source_reference: &str) -> String {
    format!("{}: {source_reference}", env.title_prefix)
}

/// Render the Changes section from commit lines.
///
/// Numbered in input order, capped at [`MAX_LISTED_COMMITS`] with a single
/// truncation marker stating the remaining count.
#[must_use]
pub fn describe_commits(commits: &[String]) -> String {
    if commits.is_empty() {
        return NO_COMMITS_PLACEHOLDER.to_string();
    }

    let mut lines: Vec<String> = commits
        .iter()
        .take(MAX_LISTED_COMMITS)
        .enumerate()
        .map(|(i, commit)| format!("{}. {commit}", i + 1))
        .collect();

    if commits.len() > MAX_LISTED_COMMITS {
        lines.push(format!(
            "_...and {} more commit(s)_",
            commits.len() - MAX_LISTED_COMMITS
        ));
    }

    lines.join("\n")
}

/// `### Related PRs` block listing PRs recorded for earlier environments in
/// the configured chain, or empty when there are none.
#[must_use]
pub fn related_prs_block(state: &RunState, envs: &[EnvironmentSpec], index: usize) -> String {
    let refs: Vec<String> = envs[..index]
        .iter()
        .filter_map(|env| {
            state
                .pr_number(env.name)
                .map(|number| format!("- {}: #{number}", env.name))
        })
        .collect();

    if refs.is_empty() {
        String::new()
    } else {
        format!("\n\n### Related PRs\n{}", refs.join("\n"))
    }
}

/// `_Previous: A ✓ | B ✓_` line, or empty for the first environment.
#[must_use]
pub fn previous_environments_line(envs: &[EnvironmentSpec], index: usize) -> String {
    if index == 0 {
        return String::new();
    }
    let names: Vec<&str> = envs[..index].iter().map(|env| env.name).collect();
    format!("\n_Previous: {} ✓_", names.join(" ✓ | "))
}

/// `_Next: B → C_` line, or empty for the last environment.
#[must_use]
pub fn next_environments_line(envs: &[EnvironmentSpec], index: usize) -> String {
    if index + 1 >= envs.len() {
        return String::new();
    }
    let names: Vec<&str> = envs[index + 1..].iter().map(|env| env.name).collect();
    format!("\n_Next: {}_", names.join(" → "))
}

/// Assemble the full PR body.
#[must_use]
pub fn build_pr_body(
    state: &RunState,
    envs: &[EnvironmentSpec],
    index: usize,
    commit_description: &str,
    created_at: &str,
) -> String {
    let env = &envs[index];
    let warning = if env.production_gate {
        "\n\n⚠️ **PRODUCTION DEPLOYMENT** - Review carefully before merging."
    } else {
        ""
    };

    format!(
        "\n**Source:** `{source}`\n\n### Changes\n{commit_description}{related}\n\n---\n{previous}{next}{warning}\n\n_Created by cascade at {created_at}_\n",
        source = state.base_branch,
        related = related_prs_block(state, envs, index),
        previous = previous_environments_line(envs, index),
        next = next_environments_line(envs, index),
    )
}

/// Commit lines for the body, per the run's mode.
///
/// Cherry-pick mode lists each picked commit as `{short_hash} - {subject}`
/// in pick order; merge mode lists the subjects the merge would introduce.
pub fn collect_commit_lines(
    vcs: &dyn Vcs,
    progress: &dyn Progress,
    state: &RunState,
    env: &EnvironmentSpec,
) -> Vec<String> {
    if state.is_cherry_pick() {
        return state
            .cherry_pick_commits
            .iter()
            .filter_map(|hash| {
                vcs.commit_subject(hash)
                    .ok()
                    .map(|subject| format!("{} - {subject}", short_hash(hash)))
            })
            .collect();
    }

    progress.info(&format!(
        "Fetching commit messages from {}...",
        state.base_branch
    ));
    let commits = vcs.subjects_between(&state.base_branch, env.target_branch);
    if commits.is_empty() {
        progress.warning("No commits found or error fetching commits");
    } else {
        progress.success(&format!("Found {} commit(s)", commits.len()));
    }
    commits
}

/// Create the PR for a built staging branch and attach reviewers.
///
/// Reviewer attachment is best effort: a failure is reported as a warning
/// and the PR still counts as created.
pub async fn publish(
    platform: &dyn PlatformService,
    vcs: &dyn Vcs,
    progress: &dyn Progress,
    state: &RunState,
    envs: &[EnvironmentSpec],
    index: usize,
    staging_branch: &str,
    reviewers: &[String],
) -> Result<CreatedPr> {
    let env = &envs[index];
    progress.info(&format!("Creating pull request for {}...", env.name));

    let commits = collect_commit_lines(vcs, progress, state, env);
    let created_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let request = CreatePrRequest {
        title: pr_title(env, &state.base_branch),
        head: staging_branch.to_string(),
        base: env.target_branch.to_string(),
        body: build_pr_body(state, envs, index, &describe_commits(&commits), &created_at),
    };

    let created = platform.create_pr(&request).await?;
    progress.success(&format!("Pull request created: {}", created.html_url));

    if !reviewers.is_empty() {
        progress.info(&format!("Adding reviewers: {}", reviewers.join(", ")));
        match platform.request_reviewers(created.number, reviewers).await {
            Ok(()) => progress.success("Reviewers added successfully"),
            Err(e) => progress.warning(&format!("Failed to add reviewers: {e}")),
        }
    }

    Ok(created)
}
