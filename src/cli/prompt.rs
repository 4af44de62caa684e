//! Terminal implementation of the conflict-gate prompt.

use dialoguer::Select;
use pr_cascade::error::{Error, Result};
use pr_cascade::gate::ConfirmationSource;
use pr_cascade::types::ConflictDecision;

/// Asks the operator through an interactive terminal menu.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl ConfirmationSource for TerminalPrompter {
    fn decide(&self) -> Result<ConflictDecision> {
        let selection = Select::new()
            .with_prompt("What would you like to do?")
            .items(&[
                "I've resolved conflicts and pushed - Continue",
                "Skip this environment",
                "Stop entire process",
            ])
            .default(0)
            .interact()
            .map_err(|e| Error::Prompt(format!("failed to read choice: {e}")))?;

        Ok(match selection {
            0 => ConflictDecision::Resolved,
            1 => ConflictDecision::Skip,
            _ => ConflictDecision::Stop,
        })
    }
}
