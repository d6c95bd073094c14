//! Session phase

use serde::{Deserialize, Serialize};

/// Phase of the single active session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Nothing pending
    #[default]
    Idle,
    /// Waiting for the plan generator
    Generating,
    /// A plan is stored and waiting for approval
    PlanReady,
    /// Commands are running
    Executing,
    /// Cancellation requested; the current command is finishing
    Cancelling,
}

impl SessionPhase {
    pub fn display_name(&self) -> &str {
        match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::Generating => "Generating",
            SessionPhase::PlanReady => "Plan Ready",
            SessionPhase::Executing => "Executing",
            SessionPhase::Cancelling => "Cancelling",
        }
    }

    /// Whether a generation or an execution is in flight
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            SessionPhase::Generating | SessionPhase::Executing | SessionPhase::Cancelling
        )
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
