//! Plan generation errors

use thiserror::Error;

/// Plan field validated during decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanField {
    Commands,
    Files,
}

impl PlanField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanField::Commands => "commands",
            PlanField::Files => "files",
        }
    }
}

impl std::fmt::Display for PlanField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a generation produced no plan.
///
/// A generation result is always exactly one of a valid [`Plan`](super::Plan)
/// or one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The generator wrote nothing to stdout
    #[error("no output")]
    NoOutput,

    /// The generator wrote more than one line to stdout
    #[error("multiple outputs")]
    MultipleOutputs,

    /// The single output line is not valid JSON
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// `commands` or `files` is absent or has the wrong shape
    #[error("{0} missing or invalid format")]
    InvalidField(PlanField),

    /// The generator itself reported an error in its payload
    #[error("{0}")]
    Reported(String),

    /// The generator process could not be started or exited abnormally
    #[error("generator failed: {0}")]
    Collaborator(String),
}

impl GenerationError {
    /// Whether the generator broke the output contract (as opposed to
    /// reporting a failure of its own).
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            GenerationError::NoOutput
                | GenerationError::MultipleOutputs
                | GenerationError::InvalidPayload(_)
                | GenerationError::InvalidField(_)
        )
    }
}
