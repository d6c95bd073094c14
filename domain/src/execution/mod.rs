//! Execution domain
//!
//! Value objects for running plan commands, privilege detection and the
//! redacted [`Credential`] type.

pub mod credential;
pub mod privilege;
pub mod value_objects;

pub use credential::Credential;
pub use privilege::PrivilegePolicy;
pub use value_objects::{
    CREDENTIAL_REQUIRED, CommandInvocation, CommandOutput, ExecutionOutcome, ExecutionResult,
    FailureKind, NO_OUTPUT,
};
