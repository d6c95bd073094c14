//! Plan domain entities

use serde::{Deserialize, Serialize};

/// A file artifact attached to a plan.
///
/// Files are carried for review only; nothing in the engine writes them to
/// disk. Duplicated paths are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFile {
    /// Relative or absolute path as produced by the generator
    pub path: String,
    /// Arbitrary text content
    #[serde(default)]
    pub content: String,
}

impl PlanFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Render as a `path:\ncontent` block for display.
    pub fn render(&self) -> String {
        format!("{}:\n{}", self.path, self.content)
    }
}

/// A generated execution plan (Entity).
///
/// `commands` are executed strictly in order; the order is part of the plan
/// because later steps may depend on earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Shell commands in execution order
    pub commands: Vec<String>,
    /// File artifacts associated with the plan
    pub files: Vec<PlanFile>,
}

impl Plan {
    pub fn new(commands: Vec<String>, files: Vec<PlanFile>) -> Self {
        Self { commands, files }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.commands.push(command.into());
        self
    }

    pub fn with_file(mut self, file: PlanFile) -> Self {
        self.files.push(file);
        self
    }

    /// Number of commands in the plan
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the plan has no commands to run
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Files rendered as `path:\ncontent` blocks, in plan order.
    pub fn rendered_files(&self) -> Vec<String> {
        self.files.iter().map(PlanFile::render).collect()
    }
}
