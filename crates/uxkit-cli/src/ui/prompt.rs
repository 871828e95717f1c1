//! Confirmation and choice prompts.
//!
//! Every prompt falls back to its default answer when the session is not
//! interactive.

use anyhow::Result;
use dialoguer::{Confirm, Select};
use std::io::IsTerminal;
use tracing::warn;

/// Whether prompts can be shown.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Ask a yes/no question.
pub fn confirm(question: &str, default: bool, interactive: bool) -> Result<bool> {
    if !interactive {
        return Ok(default);
    }

    Ok(Confirm::new().with_prompt(question).default(default).interact()?)
}

/// Ask a yes/no question, treating a failed prompt as "no".
pub fn confirm_or_decline(question: &str, interactive: bool) -> bool {
    match confirm(question, interactive, interactive) {
        Ok(answer) => answer,
        Err(e) => {
            warn!("Prompt failed: {}", e);
            false
        }
    }
}

/// Ask to pick one of `items`, returning its index.
pub fn choose<T: ToString>(question: &str, items: &[T]) -> Result<usize> {
    Ok(Select::new().with_prompt(question).items(items).default(0).interact()?)
}
