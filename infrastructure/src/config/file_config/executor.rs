//! Executor configuration from TOML (`[executor]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use taskpilot_application::{DEFAULT_PASSWORD_PROMPT, ExecutionParams};
use taskpilot_domain::PrivilegePolicy;

/// Raw executor configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutorConfig {
    /// Shell used as `<shell> -c <command>`
    pub shell: String,
    /// Token marking a command as privileged
    pub privilege_prefix: String,
    /// Label of the password prompt
    pub password_prompt: String,
    /// Working directory for plan commands
    pub working_dir: Option<PathBuf>,
}

impl Default for FileExecutorConfig {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
            privilege_prefix: "sudo".to_string(),
            password_prompt: DEFAULT_PASSWORD_PROMPT.to_string(),
            working_dir: None,
        }
    }
}

impl FileExecutorConfig {
    /// Convert to application-layer executor parameters.
    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_privilege_policy(PrivilegePolicy::new(self.privilege_prefix.clone()))
            .with_password_prompt(self.password_prompt.clone())
    }
}
