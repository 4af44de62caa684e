//! Mock platform service for testing
//!
//! Manually implements `PlatformService` with call tracking and error
//! injection, in the same spirit as the scripted vcs mock.

#![allow(dead_code)]

use async_trait::async_trait;
use pr_cascade::error::{Error, Result};
use pr_cascade::platform::{CreatePrRequest, PlatformService};
use pr_cascade::types::CreatedPr;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `request_reviewers`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerCall {
    pub pr_number: u64,
    pub reviewers: Vec<String>,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Error injection, globally or per base branch
pub struct MockPlatformService {
    next_pr_number: AtomicU64,
    create_calls: Mutex<Vec<CreatePrRequest>>,
    reviewer_calls: Mutex<Vec<ReviewerCall>>,
    error_on_create: Mutex<Option<String>>,
    error_on_create_for_base: Mutex<HashMap<String, String>>,
    error_on_reviewers: Mutex<Option<String>>,
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatformService {
    pub fn new() -> Self {
        Self {
            next_pr_number: AtomicU64::new(1),
            create_calls: Mutex::new(Vec::new()),
            reviewer_calls: Mutex::new(Vec::new()),
            error_on_create: Mutex::new(None),
            error_on_create_for_base: Mutex::new(HashMap::new()),
            error_on_reviewers: Mutex::new(None),
        }
    }

    // === Error injection ===

    /// Make every `create_pr` call fail.
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr` fail only for PRs targeting `base`.
    pub fn fail_create_pr_for_base(&self, base: &str, msg: &str) {
        self.error_on_create_for_base
            .lock()
            .unwrap()
            .insert(base.to_string(), msg.to_string());
    }

    /// Make every `request_reviewers` call fail.
    pub fn fail_request_reviewers(&self, msg: &str) {
        *self.error_on_reviewers.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification ===

    pub fn get_create_calls(&self) -> Vec<CreatePrRequest> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn get_reviewer_calls(&self) -> Vec<ReviewerCall> {
        self.reviewer_calls.lock().unwrap().clone()
    }

    pub fn create_call_count(&self) -> usize {
        self.create_calls.lock().unwrap().len()
    }

    /// Assert that a PR was created with the given head prefix and base.
    pub fn assert_created(&self, head_prefix: &str, base: &str) {
        let calls = self.get_create_calls();
        assert!(
            calls
                .iter()
                .any(|c| c.head.starts_with(head_prefix) && c.base == base),
            "Expected create_pr(head starting with {head_prefix}, base {base}) but got: {calls:?}"
        );
    }

    /// The recorded request for the PR targeting `base`.
    pub fn request_for_base(&self, base: &str) -> CreatePrRequest {
        let calls = self.get_create_calls();
        calls
            .iter()
            .find(|c| c.base == base)
            .cloned()
            .unwrap_or_else(|| panic!("no create_pr call targeting {base}; got: {calls:?}"))
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn create_pr(&self, request: &CreatePrRequest) -> Result<CreatedPr> {
        self.create_calls.lock().unwrap().push(request.clone());

        if let Some(msg) = self.error_on_create.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }
        if let Some(msg) = self
            .error_on_create_for_base
            .lock()
            .unwrap()
            .get(&request.base)
        {
            return Err(Error::Platform(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(CreatedPr {
            number,
            html_url: format!("https://github.com/test/repo/pull/{number}"),
        })
    }

    async fn request_reviewers(&self, pr_number: u64, reviewers: &[String]) -> Result<()> {
        self.reviewer_calls.lock().unwrap().push(ReviewerCall {
            pr_number,
            reviewers: reviewers.to_vec(),
        });

        if let Some(msg) = self.error_on_reviewers.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }
        Ok(())
    }
}
