//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod command_runner;
pub mod credential_prompt;
pub mod execution_progress;
pub mod plan_generator;
pub mod session_event;
pub mod session_logger;
