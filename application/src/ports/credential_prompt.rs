//! Credential prompt port for privileged commands.
//!
//! # Architecture
//!
//! Following the Ports and Adapters pattern:
//! - **Port**: [`CredentialPromptPort`] - defined here in application layer
//! - **Adapter**: `TerminalCredentialPrompt` - implemented in presentation layer
//!
//! # Flow
//!
//! ```text
//! command starts with the privilege prefix
//!        ↓
//! CredentialPromptPort::prompt_secret(label)
//!        ↓
//! Some(credential) → command rewritten to read the password from stdin
//! None             → run fails, no process is spawned
//! ```
//!
//! # Built-in Implementations
//!
//! - [`NoCredentialPrompt`] - never supplies a credential (non-interactive runs)

use async_trait::async_trait;
use taskpilot_domain::Credential;
use thiserror::Error;

/// Failures while collecting a secret.
///
/// The executor treats any error the same as "not provided".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialPromptError {
    /// User aborted the prompt (e.g., Esc or Ctrl+C)
    #[error("Prompt cancelled")]
    Cancelled,

    /// Terminal read failure
    #[error("I/O error: {0}")]
    Io(String),
}

/// Port for asking the user for a secret.
#[async_trait]
pub trait CredentialPromptPort: Send + Sync {
    /// Ask for a secret shown under `label`.
    ///
    /// Returns `Ok(None)` when the user supplied nothing.
    async fn prompt_secret(&self, label: &str) -> Result<Option<Credential>, CredentialPromptError>;
}

/// Never supplies a credential; privileged commands fail immediately.
pub struct NoCredentialPrompt;

#[async_trait]
impl CredentialPromptPort for NoCredentialPrompt {
    async fn prompt_secret(
        &self,
        _label: &str,
    ) -> Result<Option<Credential>, CredentialPromptError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_credential_prompt_returns_none() {
        let prompt = NoCredentialPrompt;
        let result = prompt.prompt_secret("Enter your sudo password").await.unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_prompt_error_display() {
        assert_eq!(CredentialPromptError::Cancelled.to_string(), "Prompt cancelled");
        assert_eq!(
            CredentialPromptError::Io("closed".to_string()).to_string(),
            "I/O error: closed"
        );
    }
}
