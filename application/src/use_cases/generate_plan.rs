//! Generate Plan use case.
//!
//! One request/response exchange with the plan generator. Failures are never
//! fatal: every error is returned as a [`GenerationError`] for the session
//! controller to report.

use crate::ports::plan_generator::PlanGeneratorPort;
use std::sync::Arc;
use taskpilot_domain::{GenerationError, Plan, Task, truncate};
use tracing::{info, warn};

/// Use case for turning a task into a plan.
#[derive(Clone)]
pub struct GeneratePlanUseCase {
    generator: Arc<dyn PlanGeneratorPort>,
}

impl GeneratePlanUseCase {
    pub fn new(generator: Arc<dyn PlanGeneratorPort>) -> Self {
        Self { generator }
    }

    /// Generate a plan for `task`.
    ///
    /// The task is forwarded unchanged, even when empty.
    pub async fn execute(&self, task: &Task) -> Result<Plan, GenerationError> {
        info!("Generating plan for task: {}", truncate(task.content(), 100));

        match self.generator.generate(task).await {
            Ok(plan) => {
                info!(
                    "Plan generated: {} command(s), {} file(s)",
                    plan.commands.len(),
                    plan.files.len()
                );
                Ok(plan)
            }
            Err(e) => {
                if e.is_protocol_error() {
                    warn!("Plan generator broke the output protocol: {}", e);
                } else {
                    warn!("Plan generation failed: {}", e);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingGenerator {
        tasks: Mutex<Vec<String>>,
        result: Result<Plan, GenerationError>,
    }

    #[async_trait]
    impl PlanGeneratorPort for RecordingGenerator {
        async fn generate(&self, task: &Task) -> Result<Plan, GenerationError> {
            self.tasks.lock().unwrap().push(task.content().to_string());
            self.result.clone()
        }
    }

    #[tokio::test]
    async fn test_forwards_empty_task_unchanged() {
        let generator = Arc::new(RecordingGenerator {
            tasks: Mutex::new(Vec::new()),
            result: Ok(Plan::default()),
        });
        let use_case = GeneratePlanUseCase::new(generator.clone());

        let plan = use_case.execute(&Task::new("")).await.unwrap();
        assert!(plan.is_empty());
        assert_eq!(*generator.tasks.lock().unwrap(), vec![String::new()]);
    }

    #[tokio::test]
    async fn test_propagates_generation_error() {
        let generator = Arc::new(RecordingGenerator {
            tasks: Mutex::new(Vec::new()),
            result: Err(GenerationError::MultipleOutputs),
        });
        let use_case = GeneratePlanUseCase::new(generator);

        let err = use_case.execute(&Task::new("deploy")).await.unwrap_err();
        assert_eq!(err, GenerationError::MultipleOutputs);
    }
}
