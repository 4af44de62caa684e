//! GitHub REST implementation of `PlatformService`.
//!
//! Works against github.com and GitHub Enterprise (custom API root). The
//! surface is two endpoints with explicit status-code contracts, so a plain
//! HTTP client is used rather than a full API binding.

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::platform::{CreatePrRequest, PlatformService};
use crate::types::CreatedPr;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// REST API version header GitHub expects.
const API_VERSION: &str = "2022-11-28";

#[derive(Deserialize)]
struct CreatePrResponse {
    html_url: String,
    number: u64,
}

/// GitHub service speaking the REST API directly.
pub struct GitHubService {
    client: Client,
    token: String,
    /// `{api_url}/repos/{owner}/{repo}`, no trailing slash.
    api_base: String,
}

impl GitHubService {
    /// Create a service for the configured repository.
    pub fn new(config: &RunConfig) -> Result<Self> {
        Self::with_api_base(&config.token, &config.api_base())
    }

    /// Create a service against an explicit API base (used by tests to
    /// point at a local mock server).
    pub fn with_api_base(token: &str, api_base: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("pr-cascade")
            .build()
            .map_err(|e| Error::Platform(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token: token.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{path}", self.api_base))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn create_pr(&self, request: &CreatePrRequest) -> Result<CreatedPr> {
        debug!(head = %request.head, base = %request.base, "creating PR");

        let response = self
            .post("/pulls")
            .json(&serde_json::json!({
                "title": request.title,
                "head": request.head,
                "base": request.base,
                "body": request.body,
            }))
            .send()
            .await
            .map_err(|e| Error::Platform(format!("failed to create PR: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Platform(format!("failed to read PR response: {e}")))?;

        if status != StatusCode::CREATED {
            return Err(Error::Platform(format!(
                "PR creation returned {status}: {body}"
            )));
        }

        let created: CreatePrResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Platform(format!("failed to parse PR response: {e}")))?;

        debug!(pr_number = created.number, "created PR");
        Ok(CreatedPr {
            number: created.number,
            html_url: created.html_url,
        })
    }

    async fn request_reviewers(&self, pr_number: u64, reviewers: &[String]) -> Result<()> {
        if reviewers.is_empty() {
            return Ok(());
        }
        debug!(pr_number, count = reviewers.len(), "requesting reviewers");

        let response = self
            .post(&format!("/pulls/{pr_number}/requested_reviewers"))
            .json(&serde_json::json!({ "reviewers": reviewers }))
            .send()
            .await
            .map_err(|e| Error::Platform(format!("failed to request reviewers: {e}")))?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => Ok(()),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(Error::Platform(format!(
                    "reviewer request returned {status}: {body}"
                )))
            }
        }
    }
}
