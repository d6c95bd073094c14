//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into adapter settings and
//! application parameters by the binary.

mod executor;
mod generator;
mod logging;
mod output;
mod repl;

pub use executor::FileExecutorConfig;
pub use generator::FileGeneratorConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems detected in a loaded configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("generator.command cannot be empty")]
    EmptyGeneratorCommand,

    #[error("generator.command '{0}' was not found on PATH")]
    GeneratorNotFound(String),

    #[error("executor.shell cannot be empty")]
    EmptyShell,

    #[error("executor.privilege_prefix is empty; no command will be treated as privileged")]
    EmptyPrivilegePrefix,
}

impl ConfigValidationError {
    /// Whether the configuration cannot work at all
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ConfigValidationError::EmptyGeneratorCommand | ConfigValidationError::EmptyShell
        )
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Plan generator process
    pub generator: FileGeneratorConfig,
    /// Command execution
    pub executor: FileExecutorConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Interactive session settings
    pub repl: FileReplConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        let command = self.generator.command.trim();
        if command.is_empty() {
            issues.push(ConfigValidationError::EmptyGeneratorCommand);
        } else if which::which(command).is_err() {
            issues.push(ConfigValidationError::GeneratorNotFound(command.to_string()));
        }

        if self.executor.shell.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyShell);
        }

        if self.executor.privilege_prefix.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyPrivilegePrefix);
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[generator]
command = "python3"
args = ["agent/plan_agent.py"]

[executor]
shell = "bash"

[output]
color = false
show_progress = false

[repl]
history_file = "/tmp/history.txt"

[logging]
transcript_dir = "/tmp/transcripts"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generator.command, "python3");
        assert_eq!(config.executor.shell, "bash");
        assert!(!config.output.color);
        assert!(!config.output.show_progress);
        assert_eq!(config.repl.history_file.as_deref(), Some("/tmp/history.txt"));
        assert_eq!(
            config.logging.transcript_dir.as_deref(),
            Some("/tmp/transcripts")
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[executor]
privilege_prefix = "doas"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.executor.privilege_prefix, "doas");
        // Defaults should apply
        assert_eq!(config.executor.shell, "sh");
        assert_eq!(config.generator.task_flag, "--task");
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.generator.command, "python3");
        assert_eq!(config.executor.privilege_prefix, "sudo");
        assert_eq!(config.executor.password_prompt, "Enter your sudo password");
        assert!(config.output.show_progress);
        assert!(config.logging.transcript_dir.is_none());
    }

    #[test]
    fn test_validate_with_available_generator() {
        let mut config = FileConfig::default();
        config.generator.command = "sh".to_string();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_all_issues() {
        let mut config = FileConfig::default();
        config.generator.command = "  ".to_string();
        config.executor.shell = String::new();
        config.executor.privilege_prefix = String::new();

        let issues = config.validate();
        assert_eq!(
            issues,
            vec![
                ConfigValidationError::EmptyGeneratorCommand,
                ConfigValidationError::EmptyShell,
                ConfigValidationError::EmptyPrivilegePrefix,
            ]
        );
        assert!(issues[0].is_fatal());
        assert!(!issues[2].is_fatal());
    }

    #[test]
    fn test_validate_missing_generator() {
        let mut config = FileConfig::default();
        config.generator.command = "taskpilot-no-such-generator".to_string();

        let issues = config.validate();
        assert_eq!(
            issues,
            vec![ConfigValidationError::GeneratorNotFound(
                "taskpilot-no-such-generator".to_string()
            )]
        );
        assert!(!issues[0].is_fatal());
    }
}
