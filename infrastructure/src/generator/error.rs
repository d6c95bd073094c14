//! Error types for the plan generator process adapter

use taskpilot_domain::GenerationError;
use thiserror::Error;

/// Failures of the generator child process itself
#[derive(Error, Debug)]
pub enum GeneratorProcessError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to collect output: {0}")]
    Io(#[from] std::io::Error),

    #[error("exited with {status}: {detail}")]
    AbnormalExit { status: String, detail: String },
}

impl From<GeneratorProcessError> for GenerationError {
    fn from(e: GeneratorProcessError) -> Self {
        GenerationError::Collaborator(e.to_string())
    }
}
