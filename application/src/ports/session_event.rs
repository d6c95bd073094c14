//! Inbound requests and outbound events of the session controller.
//!
//! These types form the boundary between the
//! [`SessionController`](crate::use_cases::session_controller::SessionController)
//! actor and whatever front-end drives it. Requests flow in through one
//! channel; events flow out, in order, through another.

use serde::Serialize;
use taskpilot_domain::{ExecutionResult, Plan, Task};

/// Requests accepted by the session controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRequest {
    /// Generate a plan for a task
    Generate { task: Task },
    /// Execute the stored plan
    Approve,
    /// Abort in-flight work or clear pending state
    Cancel,
    /// Stop the controller once in-flight work has drained
    Shutdown,
}

impl SessionRequest {
    pub fn generate(task: impl Into<Task>) -> Self {
        SessionRequest::Generate { task: task.into() }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionRequest::Generate { .. } => "generate",
            SessionRequest::Approve => "approve",
            SessionRequest::Cancel => "cancel",
            SessionRequest::Shutdown => "shutdown",
        }
    }
}

/// Events emitted by the session controller, in causal order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    // === Generation ===
    /// A generation request was accepted
    GenerationStarted { task: String },
    /// A plan was generated and stored; files are pre-rendered `path:\ncontent` blocks
    PlanReady {
        commands: Vec<String>,
        files: Vec<String>,
    },
    /// An in-flight generation was aborted by `cancel`
    GenerationCancelled,

    // === Execution ===
    /// Command `index` (0-based) of `total` is about to start
    CommandStarting {
        index: usize,
        total: usize,
        command: String,
    },
    /// Result of command `index`, one per command run
    ExecutionResult {
        index: usize,
        #[serde(flatten)]
        result: ExecutionResult,
    },
    /// Every command ran successfully
    ExecutionCompleted { executed: usize },
    /// The run stopped at a command boundary after `cancel`
    ExecutionCancelled { executed: usize },

    // === Misc ===
    /// `cancel` arrived with nothing in flight; pending state was cleared
    Cancelled,
    /// Any recovered failure (generation, state, execution)
    Error { message: String },
}

impl SessionEvent {
    pub fn plan_ready(plan: &Plan) -> Self {
        SessionEvent::PlanReady {
            commands: plan.commands.clone(),
            files: plan.rendered_files(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        SessionEvent::Error {
            message: message.into(),
        }
    }

    /// Event type identifier, matching the serialized `type` tag
    pub fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::GenerationStarted { .. } => "generationStarted",
            SessionEvent::PlanReady { .. } => "planReady",
            SessionEvent::GenerationCancelled => "generationCancelled",
            SessionEvent::CommandStarting { .. } => "commandStarting",
            SessionEvent::ExecutionResult { .. } => "executionResult",
            SessionEvent::ExecutionCompleted { .. } => "executionCompleted",
            SessionEvent::ExecutionCancelled { .. } => "executionCancelled",
            SessionEvent::Cancelled => "cancelled",
            SessionEvent::Error { .. } => "error",
        }
    }

    /// Whether this event ends a generation or an execution
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionEvent::PlanReady { .. }
                | SessionEvent::GenerationCancelled
                | SessionEvent::ExecutionCompleted { .. }
                | SessionEvent::ExecutionCancelled { .. }
                | SessionEvent::Cancelled
                | SessionEvent::Error { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskpilot_domain::PlanFile;

    #[test]
    fn test_plan_ready_renders_files() {
        let plan = Plan::default()
            .with_command("echo hi")
            .with_file(PlanFile::new("a.txt", "hello"));
        let event = SessionEvent::plan_ready(&plan);
        assert_eq!(
            event,
            SessionEvent::PlanReady {
                commands: vec!["echo hi".to_string()],
                files: vec!["a.txt:\nhello".to_string()],
            }
        );
    }

    #[test]
    fn test_serialized_tag_matches_event_type() {
        let events = vec![
            SessionEvent::GenerationStarted {
                task: "t".to_string(),
            },
            SessionEvent::GenerationCancelled,
            SessionEvent::ExecutionResult {
                index: 0,
                result: ExecutionResult::success("ok"),
            },
            SessionEvent::ExecutionCompleted { executed: 1 },
            SessionEvent::Cancelled,
            SessionEvent::error("boom"),
        ];
        for event in events {
            let value = serde_json::to_value(&event).unwrap();
            assert_eq!(value["type"], event.event_type());
        }
    }

    #[test]
    fn test_execution_result_is_flattened() {
        let event = SessionEvent::ExecutionResult {
            index: 2,
            result: ExecutionResult::failure("denied"),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["index"], 2);
        assert_eq!(value["success"], false);
        assert_eq!(value["output"], "denied");
    }

    #[test]
    fn test_request_names() {
        assert_eq!(SessionRequest::generate("x").as_str(), "generate");
        assert_eq!(SessionRequest::Approve.as_str(), "approve");
        assert_eq!(SessionRequest::Cancel.as_str(), "cancel");
        assert_eq!(SessionRequest::Shutdown.as_str(), "shutdown");
    }
}
