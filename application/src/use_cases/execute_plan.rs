//! Execute Plan use case.
//!
//! Runs a plan's commands strictly in order:
//!
//! ```text
//! for each command:
//!   cancelled?          → Cancelled { executed }
//!   on_command_start
//!   privileged?         → prompt for credential
//!     cancelled?        → Cancelled { executed }, nothing spawned
//!     none supplied     → Failed (credential), nothing spawned
//!   run → ExecutionResult
//!   on_command_result
//!   failed?             → Failed (command)
//! Completed
//! ```
//!
//! Cancellation is only observed between commands; a running child is never
//! killed. Credentials live for a single invocation and go out of scope as
//! soon as the child exits.

use crate::config::ExecutionParams;
use crate::ports::command_runner::CommandRunnerPort;
use crate::ports::credential_prompt::{CredentialPromptPort, NoCredentialPrompt};
use crate::ports::execution_progress::ExecutionProgressNotifier;
use crate::use_cases::shared::cancellation_requested;
use std::sync::Arc;
use taskpilot_domain::{
    CommandInvocation, Credential, ExecutionOutcome, ExecutionResult, FailureKind, truncate,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Use case for running a sequence of commands.
#[derive(Clone)]
pub struct ExecutePlanUseCase {
    runner: Arc<dyn CommandRunnerPort>,
    credential_prompt: Arc<dyn CredentialPromptPort>,
    params: ExecutionParams,
    cancellation_token: Option<CancellationToken>,
}

impl ExecutePlanUseCase {
    pub fn new(runner: Arc<dyn CommandRunnerPort>) -> Self {
        Self {
            runner,
            credential_prompt: Arc::new(NoCredentialPrompt),
            params: ExecutionParams::default(),
            cancellation_token: None,
        }
    }

    pub fn with_credential_prompt(mut self, prompt: Arc<dyn CredentialPromptPort>) -> Self {
        self.credential_prompt = prompt;
        self
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Run `commands` in order and report how the pass ended.
    pub async fn execute(
        &self,
        commands: &[String],
        progress: &dyn ExecutionProgressNotifier,
    ) -> ExecutionOutcome {
        let total = commands.len();
        info!("Executing plan with {} command(s)", total);

        for (index, command) in commands.iter().enumerate() {
            if cancellation_requested(&self.cancellation_token) {
                info!("Execution cancelled before command {}/{}", index + 1, total);
                return ExecutionOutcome::Cancelled { executed: index };
            }

            progress.on_command_start(index, total, command);
            debug!("Executing: {}", truncate(command, 200));

            let invocation = if self.params.privilege.is_privileged(command) {
                let credential = self.request_credential().await;
                // Cancel may arrive while the user is typing the password
                if cancellation_requested(&self.cancellation_token) {
                    info!(
                        "Execution cancelled at credential prompt for command {}/{}",
                        index + 1,
                        total
                    );
                    return ExecutionOutcome::Cancelled { executed: index };
                }
                match credential {
                    Some(credential) => self.privileged_invocation(command, credential),
                    None => {
                        warn!("No credential supplied for privileged command {}", index + 1);
                        let result = ExecutionResult::credential_missing();
                        progress.on_command_result(index, total, &result);
                        return ExecutionOutcome::Failed {
                            index,
                            command: command.clone(),
                            result,
                            kind: FailureKind::Credential,
                        };
                    }
                }
            } else {
                CommandInvocation::plain(command.clone())
            };

            let result = match self.runner.run(&invocation).await {
                Ok(output) => ExecutionResult::from_output(&output),
                Err(e) => ExecutionResult::failure(e.to_string()),
            };

            progress.on_command_result(index, total, &result);

            if !result.success {
                warn!("Command {}/{} failed", index + 1, total);
                return ExecutionOutcome::Failed {
                    index,
                    command: command.clone(),
                    result,
                    kind: FailureKind::Command,
                };
            }
        }

        info!("Plan execution completed ({} command(s))", total);
        ExecutionOutcome::Completed { executed: total }
    }

    async fn request_credential(&self) -> Option<Credential> {
        match self
            .credential_prompt
            .prompt_secret(&self.params.password_prompt)
            .await
        {
            Ok(credential) => credential,
            Err(e) => {
                warn!("Credential prompt failed: {}", e);
                None
            }
        }
    }

    fn privileged_invocation(&self, command: &str, credential: Credential) -> CommandInvocation {
        let rewritten = self
            .params
            .privilege
            .rewrite_for_stdin(command)
            .unwrap_or_else(|| command.to_string());
        CommandInvocation::privileged(rewritten, credential)
    }
}
