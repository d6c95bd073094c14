//! Application-level configuration.
//!
//! - [`ExecutionParams`] - executor control (privilege policy, password prompt)

pub mod execution_params;

pub use execution_params::{DEFAULT_PASSWORD_PROMPT, ExecutionParams};
