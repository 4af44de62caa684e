//! Core types for pr-cascade

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One deployment environment in the promotion chain.
///
/// The chain is ordinary data: three fixed instances in [`ENVIRONMENTS`],
/// walked in order. Nothing here is polymorphic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentSpec {
    /// Display name, also the key of the PR ledger.
    pub name: &'static str,
    /// Long-lived branch this environment deploys from.
    pub target_branch: &'static str,
    /// Suffix appended to staging branch names.
    pub branch_suffix: &'static str,
    /// Prefix for PR titles, e.g. `dev-qas`.
    pub title_prefix: &'static str,
    /// Short key used to select a subset of the chain.
    pub key: &'static str,
    /// Whether PRs into this environment carry the production warning.
    pub production_gate: bool,
}

/// The fixed promotion chain, in walk order.
pub const ENVIRONMENTS: [EnvironmentSpec; 3] = [
    EnvironmentSpec {
        name: "Quality",
        target_branch: "quality",
        branch_suffix: "qas",
        title_prefix: "dev-qas",
        key: "qas",
        production_gate: false,
    },
    EnvironmentSpec {
        name: "PreProduction",
        target_branch: "preprd",
        branch_suffix: "stg",
        title_prefix: "qas-stg",
        key: "stg",
        production_gate: false,
    },
    EnvironmentSpec {
        name: "Production",
        target_branch: "main",
        branch_suffix: "main",
        title_prefix: "stg-main",
        key: "main",
        production_gate: true,
    },
];

/// Select a subset of the chain by key, preserving chain order.
///
/// `None` runs the full chain. Unknown keys are ignored; a selection that
/// matches nothing is a configuration error.
pub fn filter_environments(keys: Option<&[String]>) -> Result<Vec<EnvironmentSpec>> {
    let Some(keys) = keys else {
        return Ok(ENVIRONMENTS.to_vec());
    };

    let filtered: Vec<EnvironmentSpec> = ENVIRONMENTS
        .iter()
        .filter(|env| keys.iter().any(|key| key == env.key))
        .copied()
        .collect();

    if filtered.is_empty() {
        let available: Vec<&str> = ENVIRONMENTS.iter().map(|env| env.key).collect();
        return Err(Error::Config(format!(
            "no valid environments selected; available keys: {}",
            available.join(", ")
        )));
    }

    Ok(filtered)
}

/// First eight characters of a commit hash, for display.
#[must_use]
pub fn short_hash(hash: &str) -> &str {
    hash.get(..8).unwrap_or(hash)
}

/// Mutable state scoped to one invocation.
#[derive(Debug, Clone)]
pub struct RunState {
    /// Branch carrying the change being promoted.
    pub base_branch: String,
    /// Commits to replay instead of merging; empty means merge mode.
    /// Replay order matters and is preserved.
    pub cherry_pick_commits: Vec<String>,
    /// Environment name -> created PR number, in creation order.
    pub pr_numbers: Vec<(String, u64)>,
}

impl RunState {
    /// New state for a run starting from `base_branch`.
    #[must_use]
    pub const fn new(base_branch: String, cherry_pick_commits: Vec<String>) -> Self {
        Self {
            base_branch,
            cherry_pick_commits,
            pr_numbers: Vec::new(),
        }
    }

    /// Whether this run replays explicit commits rather than merging.
    #[must_use]
    pub fn is_cherry_pick(&self) -> bool {
        !self.cherry_pick_commits.is_empty()
    }

    /// Record a created PR for an environment.
    pub fn record_pr(&mut self, environment: &str, number: u64) {
        self.pr_numbers.push((environment.to_string(), number));
    }

    /// PR number previously recorded for an environment, if any.
    #[must_use]
    pub fn pr_number(&self, environment: &str) -> Option<u64> {
        self.pr_numbers
            .iter()
            .find(|(name, _)| name == environment)
            .map(|(_, number)| *number)
    }
}

/// Terminal state of one processed environment.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentResult {
    /// Environment name.
    pub environment: String,
    /// Whether a PR was created for this environment.
    pub success: bool,
    /// Staging branch, once one was created locally.
    pub staging_branch: Option<String>,
    /// Web URL of the created PR.
    pub pr_url: Option<String>,
    /// Number of the created PR.
    pub pr_number: Option<u64>,
    /// Whether branch construction hit conflicts.
    pub has_conflicts: bool,
    /// Whether the operator skipped this environment at the conflict gate.
    pub skipped: bool,
}

impl EnvironmentResult {
    /// Empty result for an environment about to be processed.
    #[must_use]
    pub fn new(environment: &str) -> Self {
        Self {
            environment: environment.to_string(),
            ..Self::default()
        }
    }

    /// Whether this environment failed to produce a staging branch at all
    /// (fetch/checkout/push failure, not a conflict). Build failures halt
    /// the chain; publish failures do not.
    #[must_use]
    pub const fn is_build_failure(&self) -> bool {
        self.staging_branch.is_none() && !self.skipped
    }
}

/// A created pull request, as returned by the hosting API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedPr {
    /// PR number.
    pub number: u64,
    /// Web URL for the PR.
    pub html_url: String,
}

/// Operator decision at the conflict gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDecision {
    /// Conflicts resolved and pushed; verify and continue.
    Resolved,
    /// Skip this environment and move on.
    Skip,
    /// Terminate the entire run.
    Stop,
}

impl std::fmt::Display for ConflictDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolved => write!(f, "continue"),
            Self::Skip => write!(f, "skip"),
            Self::Stop => write!(f, "stop"),
        }
    }
}
