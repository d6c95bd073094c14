//! Session entity - the single-slot plan store and its phase.

use super::error::{Operation, StateError};
use super::phase::SessionPhase;
use crate::plan::Plan;

/// What a cancel request has to do, decided by the phase it arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelEffect {
    /// A generation was in flight and must be aborted
    AbortGeneration,
    /// An execution was in flight; the executor must stop at the next boundary
    SignalExecutor,
    /// Cancellation is already under way
    AlreadyCancelling,
    /// Nothing was in flight; pending state was cleared
    Cleared,
}

/// State of the single active session (Entity).
///
/// Fields are private; every mutation goes through a transition method that
/// checks the current phase. Entering [`SessionPhase::Idle`] always drops the
/// stored plan, so a plan exists exactly while a plan is ready or running.
#[derive(Debug, Clone, Default)]
pub struct Session {
    phase: SessionPhase,
    current_plan: Option<Plan>,
}

impl Session {
    /// A fresh session in the Idle phase.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_plan(&self) -> Option<&Plan> {
        self.current_plan.as_ref()
    }

    /// `generate` request: Idle / PlanReady → Generating.
    pub fn begin_generation(&mut self) -> Result<(), StateError> {
        match self.phase {
            SessionPhase::Idle | SessionPhase::PlanReady => {
                self.phase = SessionPhase::Generating;
                Ok(())
            }
            SessionPhase::Generating => Err(StateError::AlreadyInProgress(Operation::Generation)),
            SessionPhase::Executing | SessionPhase::Cancelling => {
                Err(StateError::AlreadyInProgress(Operation::Execution))
            }
        }
    }

    /// Generation succeeded: store the plan (overwriting any previous one)
    /// and move to PlanReady.
    pub fn complete_generation(&mut self, plan: Plan) {
        debug_assert_eq!(self.phase, SessionPhase::Generating);
        self.current_plan = Some(plan);
        self.phase = SessionPhase::PlanReady;
    }

    /// Generation failed: back to Idle.
    pub fn fail_generation(&mut self) {
        debug_assert_eq!(self.phase, SessionPhase::Generating);
        self.reset();
    }

    /// `approve` request: PlanReady → Executing.
    ///
    /// Returns a copy of the commands for the executor to borrow.
    pub fn begin_execution(&mut self) -> Result<Vec<String>, StateError> {
        match self.phase {
            SessionPhase::PlanReady => {
                let plan = self.current_plan.as_ref().ok_or(StateError::NoPlan)?;
                let commands = plan.commands.clone();
                self.phase = SessionPhase::Executing;
                Ok(commands)
            }
            SessionPhase::Idle => Err(StateError::NoPlan),
            SessionPhase::Generating => Err(StateError::AlreadyInProgress(Operation::Generation)),
            SessionPhase::Executing | SessionPhase::Cancelling => {
                Err(StateError::AlreadyInProgress(Operation::Execution))
            }
        }
    }

    /// `cancel` request, valid in every phase.
    pub fn request_cancel(&mut self) -> CancelEffect {
        match self.phase {
            SessionPhase::Executing => {
                self.phase = SessionPhase::Cancelling;
                CancelEffect::SignalExecutor
            }
            SessionPhase::Cancelling => CancelEffect::AlreadyCancelling,
            SessionPhase::Generating => {
                self.reset();
                CancelEffect::AbortGeneration
            }
            SessionPhase::Idle | SessionPhase::PlanReady => {
                self.reset();
                CancelEffect::Cleared
            }
        }
    }

    /// The executor finished (completed, failed or drained after cancel).
    pub fn finish_execution(&mut self) {
        debug_assert!(matches!(
            self.phase,
            SessionPhase::Executing | SessionPhase::Cancelling
        ));
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = SessionPhase::Idle;
        self.current_plan = None;
    }
}
