//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod execute_plan;
pub mod generate_plan;
pub mod session_controller;
pub(crate) mod shared;
