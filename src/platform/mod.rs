//! Pull-request hosting services.
//!
//! Provides the seam between the publisher and the hosting REST API, so the
//! walk can be tested against a scripted platform.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::CreatedPr;
use async_trait::async_trait;

/// Payload for creating a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrRequest {
    /// PR title.
    pub title: String,
    /// Head branch (the staging branch).
    pub head: String,
    /// Base branch (the environment target).
    pub base: String,
    /// Markdown body.
    pub body: String,
}

/// Pull-request API operations used by the publisher.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Open a pull request. Succeeds only on a 201 response; any other
    /// status is an error carrying the response body for diagnostics.
    async fn create_pr(&self, request: &CreatePrRequest) -> Result<CreatedPr>;

    /// Request reviews on an existing pull request (200/201 succeed).
    async fn request_reviewers(&self, pr_number: u64, reviewers: &[String]) -> Result<()>;
}
