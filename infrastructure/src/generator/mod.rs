//! Plan generator adapter (external child process)

pub mod error;
pub mod process;

pub use error::GeneratorProcessError;
pub use process::ProcessPlanGenerator;
