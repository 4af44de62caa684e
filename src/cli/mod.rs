//! Command-line interface for `cascade`.

pub mod prompt;
pub mod run;
pub mod style;

pub use run::run;

use crate::cli::style::Stylize;
use clap::Parser;
use pr_cascade::progress::Progress;

/// Sequential PR creation across deployment environments.
///
/// Builds a staging branch per environment from a base branch (merge mode)
/// or from specific commits (cherry-pick mode), then opens one pull request
/// per environment, linking each to the PRs created before it.
#[derive(Debug, Parser)]
#[command(name = "cascade", version, about)]
pub struct Cli {
    /// Base branch name (required in both merge and cherry-pick modes)
    #[arg(short = 'b', long)]
    pub base_branch: String,

    /// Commit hash(es) to cherry-pick; when omitted the whole branch is merged
    #[arg(long, num_args = 1.., value_name = "HASH")]
    pub cherry_pick: Vec<String>,

    /// Personal access token for the pull-request API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Repository in `owner/repo` form
    #[arg(long, env = "GITHUB_REPO", value_name = "OWNER/REPO")]
    pub repo: String,

    /// API root, e.g. a GitHub Enterprise `https://host/api/v3`
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Reviewers to request on each created PR
    #[arg(long, env = "PR_REVIEWERS", value_delimiter = ',')]
    pub reviewers: Vec<String>,

    /// Environment keys to run (subset of qas, stg, main)
    #[arg(long, env = "PR_ENVS", value_delimiter = ',')]
    pub envs: Vec<String>,
}

/// Styled terminal implementation of the library's progress sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliProgress;

impl Progress for CliProgress {
    fn header(&self, text: &str) {
        let rule = "=".repeat(70);
        anstream::println!("\n{}", rule.heading());
        anstream::println!("{}", format!("{text:^70}").heading());
        anstream::println!("{}\n", rule.heading());
    }

    fn success(&self, text: &str) {
        anstream::println!("{}", format!("✓ {text}").success());
    }

    fn warning(&self, text: &str) {
        anstream::println!("{}", format!("⚠ {text}").warn());
    }

    fn error(&self, text: &str) {
        anstream::println!("{}", format!("✗ {text}").err());
    }

    fn info(&self, text: &str) {
        anstream::println!("{}", format!("ℹ {text}").accent());
    }

    fn plain(&self, text: &str) {
        anstream::println!("{text}");
    }
}
