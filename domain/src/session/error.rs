//! Session state errors

use thiserror::Error;

/// Long-running operation owned by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Generation,
    Execution,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Generation => write!(f, "generation"),
            Operation::Execution => write!(f, "execution"),
        }
    }
}

/// A request that is illegal in the current phase
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("no plan to execute")]
    NoPlan,

    #[error("{0} already in progress")]
    AlreadyInProgress(Operation),
}
