//! Session controller (Actor pattern)
//!
//! Owns the [`Session`] and processes [`SessionRequest`]s from a channel.
//! Long-running work (plan generation, plan execution) runs in a
//! [`JoinSet`]; completions flow back into the same `select!` loop, so the
//! session state is only ever touched by the actor itself.
//!
//! ```text
//! front-end ──SessionRequest──▶ SessionController::run ──SessionEvent──▶ front-end
//!                                    │        ▲
//!                              spawn │        │ Completion
//!                                    ▼        │
//!                        GeneratePlanUseCase / ExecutePlanUseCase
//! ```
//!
//! Each spawned operation carries a sequence id. A completion whose id does
//! not match the operation currently in flight (e.g. a generation that
//! finished just as it was cancelled) is ignored.

use crate::ports::execution_progress::ExecutionProgressNotifier;
use crate::ports::session_event::{SessionEvent, SessionRequest};
use crate::ports::session_logger::{NoSessionLogger, SessionLogger};
use crate::use_cases::execute_plan::ExecutePlanUseCase;
use crate::use_cases::generate_plan::GeneratePlanUseCase;
use std::sync::Arc;
use taskpilot_domain::{
    CancelEffect, ExecutionOutcome, ExecutionResult, GenerationError, Plan, Session, SessionPhase,
    Task,
};
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinError, JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Outbound event channel plus the transcript logger.
#[derive(Clone)]
struct EventSink {
    tx: mpsc::UnboundedSender<SessionEvent>,
    logger: Arc<dyn SessionLogger>,
}

impl EventSink {
    fn emit(&self, event: SessionEvent) {
        self.logger.log(&event);
        // Receiver gone means nobody is listening; keep running regardless
        let _ = self.tx.send(event);
    }
}

/// Bridge from executor progress callbacks to the session event channel
struct ProgressBridge {
    events: EventSink,
}

impl ExecutionProgressNotifier for ProgressBridge {
    fn on_command_start(&self, index: usize, total: usize, command: &str) {
        self.events.emit(SessionEvent::CommandStarting {
            index,
            total,
            command: command.to_string(),
        });
    }

    fn on_command_result(&self, index: usize, _total: usize, result: &ExecutionResult) {
        self.events.emit(SessionEvent::ExecutionResult {
            index,
            result: result.clone(),
        });
    }
}

/// Result of a background operation, tagged with its sequence id
enum Completion {
    Generation {
        id: u64,
        result: Result<Plan, GenerationError>,
    },
    Execution {
        id: u64,
        outcome: ExecutionOutcome,
    },
}

struct InFlightGeneration {
    id: u64,
    abort: AbortHandle,
}

struct InFlightExecution {
    id: u64,
    token: CancellationToken,
}

/// Sender side of a running controller.
///
/// Every method returns `false` once the controller has stopped.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionRequest>,
}

impl SessionHandle {
    pub fn send(&self, request: SessionRequest) -> bool {
        self.tx.send(request).is_ok()
    }

    pub fn generate(&self, task: impl Into<Task>) -> bool {
        self.send(SessionRequest::generate(task))
    }

    pub fn approve(&self) -> bool {
        self.send(SessionRequest::Approve)
    }

    pub fn cancel(&self) -> bool {
        self.send(SessionRequest::Cancel)
    }

    pub fn shutdown(&self) -> bool {
        self.send(SessionRequest::Shutdown)
    }
}

/// The single-session state machine.
pub struct SessionController {
    generate_plan: GeneratePlanUseCase,
    execute_plan: ExecutePlanUseCase,
    events: EventSink,
    session: Session,
    next_id: u64,
    generation: Option<InFlightGeneration>,
    execution: Option<InFlightExecution>,
}

impl SessionController {
    pub fn new(
        generate_plan: GeneratePlanUseCase,
        execute_plan: ExecutePlanUseCase,
        event_tx: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            generate_plan,
            execute_plan,
            events: EventSink {
                tx: event_tx,
                logger: Arc::new(NoSessionLogger),
            },
            session: Session::new(),
            next_id: 0,
            generation: None,
            execution: None,
        }
    }

    /// Record every outbound event to a transcript.
    pub fn with_session_logger(mut self, logger: Arc<dyn SessionLogger>) -> Self {
        self.events.logger = logger;
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Spawn the actor on the current runtime.
    pub fn spawn(self) -> (SessionHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let join = tokio::spawn(self.run(rx));
        (SessionHandle { tx }, join)
    }

    /// Actor loop.
    ///
    /// Runs until `shutdown` is received (or every request sender is
    /// dropped) and all in-flight work has drained.
    pub async fn run(mut self, mut requests: mpsc::UnboundedReceiver<SessionRequest>) {
        let mut tasks: JoinSet<Completion> = JoinSet::new();
        let mut accepting = true;

        loop {
            if !accepting && tasks.is_empty() {
                break;
            }

            tokio::select! {
                biased;

                Some(res) = tasks.join_next() => {
                    match res {
                        Ok(completion) => self.finalize(completion),
                        Err(e) if e.is_cancelled() => debug!("Aborted session task reaped"),
                        Err(e) => self.recover_from_panic(e),
                    }
                }

                request = requests.recv(), if accepting => {
                    match request {
                        Some(SessionRequest::Shutdown) | None => {
                            info!("Session controller shutting down");
                            accepting = false;
                            if self.session.phase().is_busy() {
                                self.cancel();
                            }
                        }
                        Some(request) => self.handle(request, &mut tasks),
                    }
                }
            }
        }

        debug!("Session controller stopped");
    }

    fn handle(&mut self, request: SessionRequest, tasks: &mut JoinSet<Completion>) {
        debug!("Session request: {} (phase: {})", request.as_str(), self.session.phase());
        match request {
            SessionRequest::Generate { task } => self.start_generation(task, tasks),
            SessionRequest::Approve => self.start_execution(tasks),
            SessionRequest::Cancel => self.cancel(),
            // Intercepted by the run loop
            SessionRequest::Shutdown => {}
        }
    }

    fn start_generation(&mut self, task: Task, tasks: &mut JoinSet<Completion>) {
        if let Err(e) = self.session.begin_generation() {
            self.events.emit(SessionEvent::error(e.to_string()));
            return;
        }

        let id = self.next_sequence_id();
        self.events.emit(SessionEvent::GenerationStarted {
            task: task.content().to_string(),
        });

        let use_case = self.generate_plan.clone();
        let abort = tasks.spawn(async move {
            let result = use_case.execute(&task).await;
            Completion::Generation { id, result }
        });
        self.generation = Some(InFlightGeneration { id, abort });
    }

    fn start_execution(&mut self, tasks: &mut JoinSet<Completion>) {
        let commands = match self.session.begin_execution() {
            Ok(commands) => commands,
            Err(e) => {
                self.events.emit(SessionEvent::error(e.to_string()));
                return;
            }
        };

        let id = self.next_sequence_id();
        let token = CancellationToken::new();
        let use_case = self.execute_plan.clone().with_cancellation(token.clone());
        let progress = ProgressBridge {
            events: self.events.clone(),
        };

        tasks.spawn(async move {
            let outcome = use_case.execute(&commands, &progress).await;
            Completion::Execution { id, outcome }
        });
        self.execution = Some(InFlightExecution { id, token });
    }

    fn cancel(&mut self) {
        match self.session.request_cancel() {
            CancelEffect::AbortGeneration => {
                if let Some(generation) = self.generation.take() {
                    generation.abort.abort();
                }
                info!("Generation cancelled");
                self.events.emit(SessionEvent::GenerationCancelled);
            }
            CancelEffect::SignalExecutor => {
                if let Some(execution) = &self.execution {
                    execution.token.cancel();
                }
                info!("Cancellation requested; stopping after the current command");
            }
            CancelEffect::AlreadyCancelling => {
                debug!("Cancel ignored: already cancelling");
            }
            CancelEffect::Cleared => {
                self.events.emit(SessionEvent::Cancelled);
            }
        }
    }

    fn finalize(&mut self, completion: Completion) {
        match completion {
            Completion::Generation { id, result } => {
                if self.generation.as_ref().map(|g| g.id) != Some(id) {
                    debug!("Ignoring stale generation result (id {})", id);
                    return;
                }
                self.generation = None;

                match result {
                    Ok(plan) => {
                        let event = SessionEvent::plan_ready(&plan);
                        self.session.complete_generation(plan);
                        self.events.emit(event);
                    }
                    Err(e) => {
                        self.session.fail_generation();
                        self.events.emit(SessionEvent::error(e.to_string()));
                    }
                }
            }
            Completion::Execution { id, outcome } => {
                if self.execution.as_ref().map(|e| e.id) != Some(id) {
                    debug!("Ignoring stale execution outcome (id {})", id);
                    return;
                }
                self.execution = None;
                self.session.finish_execution();

                let event = match &outcome {
                    ExecutionOutcome::Completed { executed } => SessionEvent::ExecutionCompleted {
                        executed: *executed,
                    },
                    ExecutionOutcome::Cancelled { executed } => SessionEvent::ExecutionCancelled {
                        executed: *executed,
                    },
                    ExecutionOutcome::Failed { index, kind, .. } => {
                        warn!(
                            "Plan execution stopped at command {} ({} failure)",
                            index + 1,
                            kind.as_str()
                        );
                        SessionEvent::error(
                            outcome
                                .failure_message()
                                .unwrap_or_else(|| "Plan execution failed".to_string()),
                        )
                    }
                };
                self.events.emit(event);
            }
        }
        debug!("Session phase: {}", self.session.phase());
    }

    fn recover_from_panic(&mut self, e: JoinError) {
        error!("Session task panicked: {}", e);
        if self.generation.take().is_some() {
            self.session.fail_generation();
        } else if let Some(execution) = self.execution.take() {
            execution.token.cancel();
            self.session.finish_execution();
        }
        self.events
            .emit(SessionEvent::error(format!("Internal error: {}", e)));
    }

    fn next_sequence_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}
