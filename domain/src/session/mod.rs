//! Session domain.
//!
//! - [`entities::Session`] - single-slot plan store plus the lifecycle phase
//! - [`phase::SessionPhase`] - Idle / Generating / PlanReady / Executing / Cancelling
//! - [`error::StateError`] - requests that are illegal in the current phase

pub mod entities;
pub mod error;
pub mod phase;

pub use entities::{CancelEffect, Session};
pub use error::{Operation, StateError};
pub use phase::SessionPhase;
