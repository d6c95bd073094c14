//! Execution value objects.
//!
//! # Invocation
//! - [`CommandInvocation`] - one command to hand to a runner, with optional stdin secret
//! - [`CommandOutput`] - what the child process produced
//!
//! # Results
//! - [`ExecutionResult`] - per-command result shown to the caller
//! - [`ExecutionOutcome`] - how a whole run ended

use super::credential::Credential;
use serde::{Deserialize, Serialize};

/// Output shown for a successful command that printed nothing
pub const NO_OUTPUT: &str = "No output";

/// Failure message when a privileged command gets no password
pub const CREDENTIAL_REQUIRED: &str = "privileged credential required but not provided";

/// A single command ready to be run by a command runner.
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    /// Shell command text, already rewritten if privileged
    pub command: String,
    /// Secret written to the child's stdin, followed by a newline
    pub stdin_secret: Option<Credential>,
}

impl CommandInvocation {
    pub fn plain(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            stdin_secret: None,
        }
    }

    pub fn privileged(command: impl Into<String>, credential: Credential) -> Self {
        Self {
            command: command.into(),
            stdin_secret: Some(credential),
        }
    }

    pub fn is_privileged(&self) -> bool {
        self.stdin_secret.is_some()
    }
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    /// Exit code, `None` when terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(exit_code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Process-level description of a failed exit
    pub fn status_description(&self) -> String {
        match self.exit_code {
            Some(code) => format!("Command failed with exit code {}", code),
            None => "Command terminated by signal".to_string(),
        }
    }
}

/// Result of one command, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub output: String,
}

impl ExecutionResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn failure(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }

    /// Build from a finished process.
    ///
    /// Success shows stdout (or [`NO_OUTPUT`]); failure shows stderr, falling
    /// back to the exit status description.
    pub fn from_output(output: &CommandOutput) -> Self {
        if output.success {
            if output.stdout.is_empty() {
                Self::success(NO_OUTPUT)
            } else {
                Self::success(output.stdout.clone())
            }
        } else if output.stderr.is_empty() {
            Self::failure(output.status_description())
        } else {
            Self::failure(output.stderr.clone())
        }
    }

    /// Failure for a privileged command without a password
    pub fn credential_missing() -> Self {
        Self::failure(CREDENTIAL_REQUIRED)
    }
}

/// Why a run stopped at a failing command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Privileged command without a supplied credential; never spawned
    Credential,
    /// The process failed to start or exited non-zero
    Command,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Credential => "credential",
            FailureKind::Command => "command",
        }
    }
}

/// Terminal outcome of an execution pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Every command ran and succeeded
    Completed { executed: usize },
    /// The command at `index` failed; nothing after it ran
    Failed {
        index: usize,
        command: String,
        result: ExecutionResult,
        kind: FailureKind,
    },
    /// Cancellation was observed before command `executed` started
    Cancelled { executed: usize },
}

impl ExecutionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ExecutionOutcome::Completed { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExecutionOutcome::Cancelled { .. })
    }

    /// Human-readable summary of a failed run
    pub fn failure_message(&self) -> Option<String> {
        match self {
            ExecutionOutcome::Failed {
                index,
                command,
                result,
                ..
            } => Some(format!(
                "Plan execution failed at command {} ({}): {}",
                index + 1,
                command,
                result.output.trim_end()
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_from_successful_output() {
        let result = ExecutionResult::from_output(&CommandOutput::success("hi\n"));
        assert_eq!(result, ExecutionResult::success("hi\n"));
    }

    #[test]
    fn test_result_from_silent_success() {
        let result = ExecutionResult::from_output(&CommandOutput::success(""));
        assert_eq!(result.output, NO_OUTPUT);
        assert!(result.success);
    }

    #[test]
    fn test_result_from_failure_prefers_stderr() {
        let result = ExecutionResult::from_output(&CommandOutput::failure(Some(2), "ls: nope\n"));
        assert_eq!(result, ExecutionResult::failure("ls: nope\n"));
    }

    #[test]
    fn test_result_from_failure_falls_back_to_status() {
        let result = ExecutionResult::from_output(&CommandOutput::failure(Some(1), ""));
        assert_eq!(result.output, "Command failed with exit code 1");

        let result = ExecutionResult::from_output(&CommandOutput::failure(None, ""));
        assert_eq!(result.output, "Command terminated by signal");
    }

    #[test]
    fn test_invocation_debug_hides_secret() {
        let invocation = CommandInvocation::privileged(
            "sudo -S -p '' true",
            Credential::new("s3cret").unwrap(),
        );
        assert!(invocation.is_privileged());
        assert!(!format!("{:?}", invocation).contains("s3cret"));
    }

    #[test]
    fn test_failure_message() {
        let outcome = ExecutionOutcome::Failed {
            index: 1,
            command: "false".to_string(),
            result: ExecutionResult::failure("Command failed with exit code 1"),
            kind: FailureKind::Command,
        };
        assert_eq!(
            outcome.failure_message().unwrap(),
            "Plan execution failed at command 2 (false): Command failed with exit code 1"
        );
        assert!(ExecutionOutcome::Completed { executed: 3 }.failure_message().is_none());
    }

    #[test]
    fn test_failure_kind_names() {
        assert_eq!(FailureKind::Credential.as_str(), "credential");
        assert_eq!(FailureKind::Command.as_str(), "command");
    }
}
