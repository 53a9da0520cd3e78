//! Confirmation step for destructive operations.
//!
//! The caller awaits the answer before anything is dispatched; declining is not
//! an error.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Confirm: Send + Sync {
    /// Ask the user; `true` means proceed
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Prompt shown before a book is deleted
pub fn delete_prompt(title: &str) -> String {
    format!("Are you sure you want to delete \"{}\"?", title)
}

/// Accepts every prompt (non-interactive use, `--yes`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

#[async_trait]
impl Confirm for AlwaysConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!(%prompt, "Auto-confirmed");
        true
    }
}

/// Asks on the terminal with a `[y/N]` prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let mut stdout = tokio::io::stdout();
        let question = format!("{} [y/N] ", prompt);
        if stdout.write_all(question.as_bytes()).await.is_err() || stdout.flush().await.is_err() {
            return false;
        }

        let mut answer = String::new();
        match BufReader::new(tokio::io::stdin()).read_line(&mut answer).await {
            Ok(_) => is_affirmative(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

/// Only an explicit yes counts; anything else, including EOF, declines
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
