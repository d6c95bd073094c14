//! Execution parameters - executor behaviour control.
//!
//! [`ExecutionParams`] groups the static parameters that control
//! [`ExecutePlanUseCase`](crate::use_cases::execute_plan::ExecutePlanUseCase):
//! how privileged commands are recognised and what the password prompt says.
//! The shell and working directory belong to the command runner adapter.

use serde::{Deserialize, Serialize};
use taskpilot_domain::PrivilegePolicy;

/// Label shown when asking for a privileged command's password
pub const DEFAULT_PASSWORD_PROMPT: &str = "Enter your sudo password";

/// Executor control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Privilege detection and stdin rewriting.
    pub privilege: PrivilegePolicy,
    /// Label passed to the credential prompt.
    pub password_prompt: String,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            privilege: PrivilegePolicy::default(),
            password_prompt: DEFAULT_PASSWORD_PROMPT.to_string(),
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_privilege_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.privilege.prefix = prefix.into();
        self
    }

    pub fn with_privilege_policy(mut self, policy: PrivilegePolicy) -> Self {
        self.privilege = policy;
        self
    }

    pub fn with_password_prompt(mut self, label: impl Into<String>) -> Self {
        self.password_prompt = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.privilege.prefix, "sudo");
        assert_eq!(params.password_prompt, "Enter your sudo password");
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_privilege_prefix("doas")
            .with_password_prompt("Password for doas");

        assert_eq!(params.privilege.prefix, "doas");
        assert!(params.privilege.is_privileged("doas reboot"));
        assert!(!params.privilege.is_privileged("sudo reboot"));
        assert_eq!(params.password_prompt, "Password for doas");
    }
}
