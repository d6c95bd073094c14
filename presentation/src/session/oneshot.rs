//! One-shot mode: generate, confirm, execute, exit.

use crate::prompt::terminal::confirm;
use crate::session::presenter::SessionPresenter;
use colored::Colorize;
use taskpilot_application::{SessionEvent, SessionHandle};
use tokio::sync::mpsc;
use tracing::warn;

/// How a one-shot run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneShotOutcome {
    /// Every command ran successfully
    Completed,
    /// Generation or a command failed
    Failed,
    /// Cancelled with Ctrl+C
    Cancelled,
    /// The user did not approve the plan
    Declined,
}

impl OneShotOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, OneShotOutcome::Completed)
    }
}

/// Drives a single task through the session controller
pub struct OneShotRunner {
    handle: SessionHandle,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    presenter: SessionPresenter,
    auto_approve: bool,
}

impl OneShotRunner {
    pub fn new(
        handle: SessionHandle,
        events: mpsc::UnboundedReceiver<SessionEvent>,
        presenter: SessionPresenter,
    ) -> Self {
        Self {
            handle,
            events,
            presenter,
            auto_approve: false,
        }
    }

    /// Skip the confirmation question
    pub fn with_auto_approve(mut self, yes: bool) -> Self {
        self.auto_approve = yes;
        self
    }

    /// Run `task` to completion and shut the controller down.
    pub async fn run(mut self, task: &str) -> OneShotOutcome {
        let outcome = self.drive(task).await;
        self.handle.shutdown();
        outcome
    }

    async fn drive(&mut self, task: &str) -> OneShotOutcome {
        if !self.handle.generate(task) {
            return OneShotOutcome::Failed;
        }

        match self.next_outcome().await {
            Some(SessionEvent::PlanReady { .. }) => {}
            Some(SessionEvent::GenerationCancelled) => return OneShotOutcome::Cancelled,
            _ => return OneShotOutcome::Failed,
        }

        if !self.auto_approve && !Self::confirm_plan().await {
            println!("{}", "Plan discarded".yellow());
            self.handle.cancel();
            self.next_outcome().await;
            return OneShotOutcome::Declined;
        }

        self.handle.approve();
        match self.next_outcome().await {
            Some(SessionEvent::ExecutionCompleted { .. }) => OneShotOutcome::Completed,
            Some(SessionEvent::ExecutionCancelled { .. }) => OneShotOutcome::Cancelled,
            _ => OneShotOutcome::Failed,
        }
    }

    async fn next_outcome(&mut self) -> Option<SessionEvent> {
        self.presenter
            .await_outcome(&mut self.events, &self.handle)
            .await
    }

    async fn confirm_plan() -> bool {
        match tokio::task::spawn_blocking(|| confirm("Run this plan?")).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                warn!("Confirmation failed: {}", e);
                false
            }
            Err(e) => {
                warn!("Confirmation task failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::reporter::ActivityIndicator;
    use async_trait::async_trait;
    use std::sync::Arc;
    use taskpilot_application::{
        CommandRunError, CommandRunnerPort, ExecutePlanUseCase, GeneratePlanUseCase,
        PlanGeneratorPort, SessionController,
    };
    use taskpilot_domain::{CommandInvocation, CommandOutput, GenerationError, Plan, Task};

    struct FixedGenerator(Result<Plan, GenerationError>);

    #[async_trait]
    impl PlanGeneratorPort for FixedGenerator {
        async fn generate(&self, _task: &Task) -> Result<Plan, GenerationError> {
            self.0.clone()
        }
    }

    /// "fail" exits 1, everything else prints "ok"
    struct EchoRunner;

    #[async_trait]
    impl CommandRunnerPort for EchoRunner {
        async fn run(
            &self,
            invocation: &CommandInvocation,
        ) -> Result<CommandOutput, CommandRunError> {
            if invocation.command == "fail" {
                Ok(CommandOutput::failure(Some(1), "boom"))
            } else {
                Ok(CommandOutput::success("ok\n"))
            }
        }
    }

    fn runner(generated: Result<Plan, GenerationError>) -> OneShotRunner {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let controller = SessionController::new(
            GeneratePlanUseCase::new(Arc::new(FixedGenerator(generated))),
            ExecutePlanUseCase::new(Arc::new(EchoRunner)),
            event_tx,
        );
        let (handle, _join) = controller.spawn();
        OneShotRunner::new(
            handle,
            event_rx,
            SessionPresenter::new(ActivityIndicator::hidden()),
        )
        .with_auto_approve(true)
    }

    #[tokio::test]
    async fn test_completed_run() {
        let plan = Plan::default().with_command("one").with_command("two");
        let outcome = runner(Ok(plan)).run("do it").await;
        assert_eq!(outcome, OneShotOutcome::Completed);
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_empty_plan_completes() {
        let outcome = runner(Ok(Plan::default())).run("nothing").await;
        assert_eq!(outcome, OneShotOutcome::Completed);
    }

    #[tokio::test]
    async fn test_failing_command() {
        let plan = Plan::default().with_command("one").with_command("fail");
        let outcome = runner(Ok(plan)).run("do it").await;
        assert_eq!(outcome, OneShotOutcome::Failed);
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn test_generation_error() {
        let outcome = runner(Err(GenerationError::NoOutput)).run("do it").await;
        assert_eq!(outcome, OneShotOutcome::Failed);
    }
}
