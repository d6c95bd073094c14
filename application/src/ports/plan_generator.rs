//! Plan generator port.
//!
//! Turns a natural-language [`Task`] into a [`Plan`] by asking an external
//! collaborator. The infrastructure adapter runs a child process; tests use
//! in-memory fakes.
//!
//! Implementations must be cancel-safe: the session controller aborts an
//! in-flight generation by dropping the future, which has to release
//! (kill) whatever the adapter started.

use async_trait::async_trait;
use taskpilot_domain::{GenerationError, Plan, Task};

/// Port for generating a plan from a task.
#[async_trait]
pub trait PlanGeneratorPort: Send + Sync {
    /// Perform one request/response exchange with the generator.
    ///
    /// No retries. Collaborator crashes are reported as
    /// [`GenerationError::Collaborator`] rather than panicking.
    async fn generate(&self, task: &Task) -> Result<Plan, GenerationError>;
}
