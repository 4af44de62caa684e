//! Shared fixtures and mocks for pr-cascade tests.
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

pub mod mock_platform;
pub mod mock_vcs;

pub use mock_platform::MockPlatformService;
pub use mock_vcs::MockVcs;

use pr_cascade::error::{Error, Result};
use pr_cascade::gate::ConfirmationSource;
use pr_cascade::progress::Progress;
use pr_cascade::types::{ConflictDecision, ENVIRONMENTS, EnvironmentSpec, RunState};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress sink recording `(level, text)` pairs for assertions.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    lines: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any recorded line at `level` contains `needle`.
    pub fn contains(&self, level: &str, needle: &str) -> bool {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .any(|(l, text)| *l == level && text.contains(needle))
    }

    pub fn all_lines(&self) -> Vec<(&'static str, String)> {
        self.lines.lock().unwrap().clone()
    }

    fn record(&self, level: &'static str, text: &str) {
        self.lines.lock().unwrap().push((level, text.to_string()));
    }
}

impl Progress for RecordingProgress {
    fn header(&self, text: &str) {
        self.record("header", text);
    }
    fn success(&self, text: &str) {
        self.record("success", text);
    }
    fn warning(&self, text: &str) {
        self.record("warning", text);
    }
    fn error(&self, text: &str) {
        self.record("error", text);
    }
    fn info(&self, text: &str) {
        self.record("info", text);
    }
    fn plain(&self, text: &str) {
        self.record("plain", text);
    }
}

/// Scripted gate decisions, consumed in order.
///
/// Errors when asked for more decisions than were scripted, so a test that
/// expects no prompting can use [`ScriptedConfirmation::never`].
pub struct ScriptedConfirmation {
    decisions: Mutex<Vec<ConflictDecision>>,
    calls: AtomicUsize,
}

impl ScriptedConfirmation {
    pub fn new(decisions: &[ConflictDecision]) -> Self {
        Self {
            decisions: Mutex::new(decisions.to_vec()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A confirmation source that must never be consulted.
    pub fn never() -> Self {
        Self::new(&[])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ConfirmationSource for ScriptedConfirmation {
    fn decide(&self) -> Result<ConflictDecision> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut decisions = self.decisions.lock().unwrap();
        if decisions.is_empty() {
            return Err(Error::Internal(
                "unexpected conflict prompt in test".to_string(),
            ));
        }
        Ok(decisions.remove(0))
    }
}

/// Merge-mode run state for `base`.
pub fn merge_state(base: &str) -> RunState {
    RunState::new(base.to_string(), vec![])
}

/// Cherry-pick run state for `base` with the given hashes.
pub fn cherry_state(base: &str, hashes: &[&str]) -> RunState {
    RunState::new(
        base.to_string(),
        hashes.iter().map(ToString::to_string).collect(),
    )
}

/// The full three-environment chain.
pub fn full_chain() -> Vec<EnvironmentSpec> {
    ENVIRONMENTS.to_vec()
}
