//! Command runner port.
//!
//! Runs a single shell command to completion and captures its output.
//! The runner never interprets the command; privilege handling happens
//! before the invocation is built.

use async_trait::async_trait;
use taskpilot_domain::{CommandInvocation, CommandOutput};
use thiserror::Error;

/// Process-level failures (the command never produced an exit status).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandRunError {
    #[error("Failed to start command: {0}")]
    Spawn(String),

    #[error("Failed to write to command stdin: {0}")]
    Stdin(String),

    #[error("Failed to wait for command: {0}")]
    Wait(String),
}

/// Port for running one command.
#[async_trait]
pub trait CommandRunnerPort: Send + Sync {
    /// Run the command and wait for it to exit.
    ///
    /// A non-zero exit is a successful *run* with `success == false` in the
    /// returned [`CommandOutput`]; `Err` is reserved for failures where no
    /// exit status exists.
    async fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput, CommandRunError>;
}
