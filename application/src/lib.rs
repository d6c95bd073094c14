//! Application layer for taskpilot
//!
//! This crate contains use cases, port definitions, application configuration
//! and the session controller actor. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_PASSWORD_PROMPT, ExecutionParams};
pub use ports::{
    command_runner::{CommandRunError, CommandRunnerPort},
    credential_prompt::{CredentialPromptError, CredentialPromptPort, NoCredentialPrompt},
    execution_progress::{ExecutionProgressNotifier, NoExecutionProgress},
    plan_generator::PlanGeneratorPort,
    session_event::{SessionEvent, SessionRequest},
    session_logger::{NoSessionLogger, SessionLogger},
};
pub use use_cases::execute_plan::ExecutePlanUseCase;
pub use use_cases::generate_plan::GeneratePlanUseCase;
pub use use_cases::session_controller::{SessionController, SessionHandle};
