//! Privilege escalation detection and command rewriting.
//!
//! A command is privileged when its first token is the escalation prefix
//! (`sudo` by default). Such a command is rewritten so the escalation tool
//! reads the password from stdin instead of a terminal:
//!
//! ```text
//! sudo apt update   →   sudo -S -p '' apt update
//! ```

use serde::{Deserialize, Serialize};

/// Default escalation prefix
pub const DEFAULT_PRIVILEGE_PREFIX: &str = "sudo";

/// Default flags making `sudo` read the password from stdin silently
pub const DEFAULT_STDIN_FLAGS: &str = "-S -p ''";

/// How privileged commands are recognised and rewritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegePolicy {
    /// Token that marks a command as privileged
    pub prefix: String,
    /// Flags inserted after the prefix so the password is read from stdin
    pub stdin_flags: String,
}

impl Default for PrivilegePolicy {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PRIVILEGE_PREFIX.to_string(),
            stdin_flags: DEFAULT_STDIN_FLAGS.to_string(),
        }
    }
}

impl PrivilegePolicy {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    pub fn with_stdin_flags(mut self, flags: impl Into<String>) -> Self {
        self.stdin_flags = flags.into();
        self
    }

    /// Whether `command` starts with the escalation token.
    ///
    /// Leading whitespace is ignored; the prefix must be a whole token, so
    /// `sudoku` is not privileged.
    pub fn is_privileged(&self, command: &str) -> bool {
        self.strip_prefix(command).is_some()
    }

    /// Rewrite a privileged command to read the password from stdin.
    ///
    /// Returns `None` for commands that are not privileged.
    pub fn rewrite_for_stdin(&self, command: &str) -> Option<String> {
        let rest = self.strip_prefix(command)?;
        let mut rewritten = self.prefix.clone();
        if !self.stdin_flags.is_empty() {
            rewritten.push(' ');
            rewritten.push_str(&self.stdin_flags);
        }
        rewritten.push_str(rest);
        Some(rewritten)
    }

    /// The remainder after the prefix token (keeps its leading whitespace).
    fn strip_prefix<'a>(&self, command: &'a str) -> Option<&'a str> {
        if self.prefix.is_empty() {
            return None;
        }
        let rest = command.trim_start().strip_prefix(self.prefix.as_str())?;
        match rest.chars().next() {
            None => Some(rest),
            Some(c) if c.is_whitespace() => Some(rest),
            Some(_) => None,
        }
    }
}
