//! Plan generator configuration from TOML (`[generator]` section)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Raw generator configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeneratorConfig {
    /// Program to spawn
    pub command: String,
    /// Arguments placed before the task flag
    pub args: Vec<String>,
    /// Flag preceding the task text (empty = positional)
    pub task_flag: String,
    /// Working directory for the generator process
    pub working_dir: Option<PathBuf>,
    /// Extra environment variables
    pub env: BTreeMap<String, String>,
}

impl Default for FileGeneratorConfig {
    fn default() -> Self {
        Self {
            command: "python3".to_string(),
            args: vec!["agent/plan_agent.py".to_string()],
            task_flag: "--task".to_string(),
            working_dir: None,
            env: BTreeMap::new(),
        }
    }
}
