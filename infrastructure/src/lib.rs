//! Infrastructure layer for taskpilot
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the plan generator child process, the shell
//! command runner, the JSONL transcript logger and configuration loading.

pub mod config;
pub mod generator;
pub mod logging;
pub mod shell;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileExecutorConfig, FileGeneratorConfig,
    FileLoggingConfig, FileOutputConfig, FileReplConfig,
};
pub use generator::{GeneratorProcessError, ProcessPlanGenerator};
pub use logging::JsonlSessionLogger;
pub use shell::{DEFAULT_SHELL, ShellCommandRunner};
