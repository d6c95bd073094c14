//! Shell command runner.
//!
//! Runs each command as `<shell> -c <command>` and waits for it without a
//! timeout. When the invocation carries a secret it is written to the
//! child's stdin followed by a newline, then stdin is closed.
//!
//! Each command gets its own process group, so a Ctrl+C aimed at taskpilot
//! (which cancels at the next command boundary) does not also kill the
//! command that is currently running.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use taskpilot_application::{CommandRunError, CommandRunnerPort};
use taskpilot_domain::{CommandInvocation, CommandOutput};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Default shell used to interpret commands
pub const DEFAULT_SHELL: &str = "sh";

/// Command runner backed by a POSIX shell.
#[derive(Debug, Clone)]
pub struct ShellCommandRunner {
    shell: String,
    working_dir: Option<PathBuf>,
}

impl Default for ShellCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl ShellCommandRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            working_dir: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn build_command(&self, invocation: &CommandInvocation) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c")
            .arg(&invocation.command)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        cmd.process_group(0);

        if invocation.is_privileged() {
            cmd.stdin(Stdio::piped());
        } else {
            cmd.stdin(Stdio::null());
        }

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        cmd
    }
}

#[async_trait]
impl CommandRunnerPort for ShellCommandRunner {
    async fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput, CommandRunError> {
        // The secret is never part of the command text, so this is safe to log
        debug!("{} -c {}", self.shell, invocation.command);

        let mut child = self
            .build_command(invocation)
            .spawn()
            .map_err(|e| CommandRunError::Spawn(e.to_string()))?;

        if let Some(secret) = &invocation.stdin_secret
            && let Some(mut stdin) = child.stdin.take()
        {
            let mut line = secret.expose().as_bytes().to_vec();
            line.push(b'\n');
            // A child that exits without reading stdin closes the pipe early
            if let Err(e) = stdin.write_all(&line).await
                && e.kind() != std::io::ErrorKind::BrokenPipe
            {
                let _ = child.kill().await;
                return Err(CommandRunError::Stdin(e.to_string()));
            }
            drop(stdin);
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| CommandRunError::Wait(e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        Ok(CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout,
            stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskpilot_domain::{Credential, ExecutionResult};
    #[cfg(target_os = "linux")]
    use std::time::Duration;

    /// Whether `pid` is gone or only a zombie awaiting reaping
    #[cfg(target_os = "linux")]
    fn is_dead(pid: u32) -> bool {
        match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
            Err(_) => true,
            Ok(stat) => stat
                .rsplit_once(')')
                .is_some_and(|(_, rest)| rest.trim_start().starts_with('Z')),
        }
    }

    #[tokio::test]
    async fn test_run_echo() {
        let runner = ShellCommandRunner::default();
        let output = runner
            .run(&CommandInvocation::plain("echo hello"))
            .await
            .unwrap();

        assert!(output.success);
        assert_eq!(output.exit_code, Some(0));
        assert_eq!(output.stdout, "hello\n");
        assert_eq!(ExecutionResult::from_output(&output).output, "hello\n");
    }

    #[tokio::test]
    async fn test_silent_success_reports_no_output() {
        let runner = ShellCommandRunner::default();
        let output = runner.run(&CommandInvocation::plain("true")).await.unwrap();
        assert_eq!(
            ExecutionResult::from_output(&output),
            ExecutionResult::success("No output")
        );
    }

    #[tokio::test]
    async fn test_nonzero_exit_captures_stderr() {
        let runner = ShellCommandRunner::default();
        let output = runner
            .run(&CommandInvocation::plain("echo oops >&2; exit 4"))
            .await
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.exit_code, Some(4));
        assert_eq!(output.stderr, "oops\n");
        assert_eq!(
            ExecutionResult::from_output(&output),
            ExecutionResult::failure("oops\n")
        );
    }

    #[tokio::test]
    async fn test_nonzero_exit_without_stderr() {
        let runner = ShellCommandRunner::default();
        let output = runner.run(&CommandInvocation::plain("exit 2")).await.unwrap();
        assert_eq!(
            ExecutionResult::from_output(&output).output,
            "Command failed with exit code 2"
        );
    }

    #[tokio::test]
    async fn test_secret_written_to_stdin() {
        let runner = ShellCommandRunner::default();
        let credential = Credential::new("s3cret").unwrap();
        let output = runner
            .run(&CommandInvocation::privileged(
                "read -r pw; echo \"got $pw\"",
                credential,
            ))
            .await
            .unwrap();

        assert!(output.success);
        assert_eq!(output.stdout, "got s3cret\n");
    }

    #[tokio::test]
    async fn test_secret_ignored_by_child() {
        let runner = ShellCommandRunner::default();
        let credential = Credential::new("unused").unwrap();
        let output = runner
            .run(&CommandInvocation::privileged("exit 0", credential))
            .await
            .unwrap();
        assert!(output.success);
    }

    #[tokio::test]
    async fn test_plain_command_gets_empty_stdin() {
        let runner = ShellCommandRunner::default();
        let output = runner
            .run(&CommandInvocation::plain("cat; echo done"))
            .await
            .unwrap();
        assert_eq!(output.stdout, "done\n");
    }

    #[tokio::test]
    async fn test_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ShellCommandRunner::default().with_working_dir(dir.path());
        let output = runner.run(&CommandInvocation::plain("pwd")).await.unwrap();

        let name = dir.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(output.stdout.trim_end().ends_with(&name));
    }

    #[tokio::test]
    async fn test_missing_shell_is_spawn_error() {
        let runner = ShellCommandRunner::new("/nonexistent/shell");
        let err = runner
            .run(&CommandInvocation::plain("echo hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandRunError::Spawn(_)));
        assert!(err.to_string().starts_with("Failed to start command"));
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_command_runs_in_its_own_process_group() {
        let runner = ShellCommandRunner::default();
        let output = runner
            .run(&CommandInvocation::plain(
                "echo $$ $(cut -d' ' -f5 /proc/$$/stat)",
            ))
            .await
            .unwrap();

        let ids: Vec<i32> = output
            .stdout
            .split_whitespace()
            .map(|id| id.parse().unwrap())
            .collect();
        let (pid, pgid) = (ids[0], ids[1]);
        assert_eq!(pgid, pid, "command should lead its own group");
        assert_ne!(pgid, unsafe { libc::getpgrp() });
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_abandoned_run_kills_child() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("pid");
        let runner = ShellCommandRunner::default();
        let invocation =
            CommandInvocation::plain(format!("echo $$ > '{}'; exec sleep 30", pid_file.display()));

        let mut run = Box::pin(runner.run(&invocation));
        let pid = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                tokio::select! {
                    _ = &mut run => panic!("command finished early"),
                    _ = tokio::time::sleep(Duration::from_millis(20)) => {
                        if let Ok(text) = std::fs::read_to_string(&pid_file)
                            && let Ok(pid) = text.trim().parse::<u32>()
                        {
                            return pid;
                        }
                    }
                }
            }
        })
        .await
        .unwrap();
        assert!(!is_dead(pid));

        drop(run);

        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        while !is_dead(pid) {
            assert!(tokio::time::Instant::now() < deadline, "child {} still running", pid);
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}
