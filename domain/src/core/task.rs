//! Task value object

use serde::{Deserialize, Serialize};

/// Natural-language description of the work a plan should accomplish (Value Object)
///
/// The text is opaque to the engine and forwarded to the generator as-is,
/// including the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Task {
    content: String,
}

impl Task {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Get the task text
    pub fn content(&self) -> &str {
        &self.content
    }

}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Task {
    fn from(s: &str) -> Self {
        Task::new(s)
    }
}

impl From<String> for Task {
    fn from(s: String) -> Self {
        Task::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_from_str() {
        let task: Task = "install nginx".into();
        assert_eq!(task.content(), "install nginx");
        assert_eq!(task.to_string(), "install nginx");
    }

    #[test]
    fn test_empty_task_is_allowed() {
        let task = Task::new("");
        assert_eq!(task.content(), "");
        assert_eq!(Task::new("  \n").content(), "  \n");
    }

    #[test]
    fn test_task_serializes_as_plain_string() {
        let json = serde_json::to_string(&Task::new("build it")).unwrap();
        assert_eq!(json, "\"build it\"");
    }
}
