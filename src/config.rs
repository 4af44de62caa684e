//! Run configuration assembled from CLI arguments and environment variables.

use crate::error::{Error, Result};
use url::Url;

/// Everything a run needs beyond the change itself.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Personal access token for the pull-request API.
    pub token: String,
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// API root with no trailing slash, e.g. `https://api.github.com`.
    pub api_url: String,
    /// Reviewers to request on every created PR.
    pub reviewers: Vec<String>,
    /// Optional subset of environment keys to run.
    pub env_keys: Option<Vec<String>>,
}

impl RunConfig {
    /// Build and validate a configuration.
    ///
    /// `repo_slug` must be `owner/repo`. Reviewer and environment-key lists
    /// are trimmed and emptied of blanks; an empty key list means "run the
    /// full chain".
    pub fn new(
        token: &str,
        repo_slug: &str,
        api_url: &str,
        reviewers: Vec<String>,
        env_keys: Vec<String>,
    ) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(Error::Config("GITHUB_TOKEN is not set".to_string()));
        }

        let (owner, repo) = repo_slug
            .split_once('/')
            .ok_or_else(|| {
                Error::Config(format!(
                    "GITHUB_REPO must be 'owner/repo', got '{repo_slug}'"
                ))
            })?;
        if owner.is_empty() || repo.is_empty() {
            return Err(Error::Config(format!(
                "GITHUB_REPO must be 'owner/repo', got '{repo_slug}'"
            )));
        }

        let env_keys = clean_list(env_keys);

        Ok(Self {
            token: token.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            api_url: normalize_api_url(api_url)?,
            reviewers: clean_list(reviewers).unwrap_or_default(),
            env_keys,
        })
    }

    /// REST base for this repository: `{api_url}/repos/{owner}/{repo}`.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("{}/repos/{}/{}", self.api_url, self.owner, self.repo)
    }
}

/// Trim entries and drop blanks; `None` when nothing remains.
fn clean_list(values: Vec<String>) -> Option<Vec<String>> {
    let cleaned: Vec<String> = values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect();
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

fn normalize_api_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw)
        .map_err(|e| Error::Config(format!("invalid GITHUB_API_URL '{raw}': {e}")))?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}
