//! Plan domain
//!
//! - [`entities::Plan`] - ordered commands plus file artifacts
//! - [`parser`] - strict decoding of generator output
//! - [`error::GenerationError`] - why a generation produced no plan

pub mod entities;
pub mod error;
pub mod parser;

pub use entities::{Plan, PlanFile};
pub use error::{GenerationError, PlanField};
pub use parser::{decode_generator_output, decode_payload, find_reported_error};
