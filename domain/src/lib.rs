//! Domain layer for taskpilot
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Plan
//!
//! A plan is an ordered list of shell commands plus a set of file artifacts,
//! produced by an external generator from a natural-language [`Task`]. The
//! generator speaks a strict single-line JSON protocol decoded by
//! [`decode_generator_output`].
//!
//! ## Session
//!
//! One process-wide [`Session`] moves through
//! Idle → Generating → PlanReady → Executing (→ Cancelling) → Idle.
//! It owns the single plan slot; every transition is checked.
//!
//! ## Execution
//!
//! Commands run strictly in order. Commands starting with the privilege
//! prefix (`sudo`) need a [`Credential`], which is written to the child's
//! stdin and never stored.

pub mod core;
pub mod execution;
pub mod plan;
pub mod session;

// Re-export commonly used types
pub use core::{string::truncate, task::Task};
pub use execution::{
    CREDENTIAL_REQUIRED, CommandInvocation, CommandOutput, Credential, ExecutionOutcome,
    ExecutionResult, FailureKind, NO_OUTPUT, PrivilegePolicy,
};
pub use plan::{
    GenerationError, Plan, PlanField, PlanFile, decode_generator_output, decode_payload,
    find_reported_error,
};
pub use session::{CancelEffect, Operation, Session, SessionPhase, StateError};
