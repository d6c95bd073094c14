//! Child-process plan generator.
//!
//! Runs `<command> <args...> <task_flag> <task>` once per generation and
//! decodes its stdout with the strict single-line protocol. stderr is only
//! logged, except when the process exits abnormally without reporting an
//! error payload; then its last line becomes the error detail.

use super::error::GeneratorProcessError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;
use taskpilot_application::PlanGeneratorPort;
use taskpilot_domain::{GenerationError, Plan, Task, decode_generator_output, find_reported_error};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Default flag preceding the task argument
pub const DEFAULT_TASK_FLAG: &str = "--task";

/// Plan generator backed by an external process.
///
/// The child is killed if the generation future is dropped (e.g. the
/// session aborted it), and on Linux also when this process dies.
#[derive(Debug, Clone)]
pub struct ProcessPlanGenerator {
    command: String,
    args: Vec<String>,
    task_flag: String,
    working_dir: Option<PathBuf>,
    env: BTreeMap<String, String>,
}

impl ProcessPlanGenerator {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            task_flag: DEFAULT_TASK_FLAG.to_string(),
            working_dir: None,
            env: BTreeMap::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_task_flag(mut self, flag: impl Into<String>) -> Self {
        self.task_flag = flag.into();
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_envs(mut self, env: BTreeMap<String, String>) -> Self {
        self.env.extend(env);
        self
    }

    fn build_command(&self, task: &Task) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args);
        // An empty flag means the task is passed as a bare positional argument
        if !self.task_flag.is_empty() {
            cmd.arg(&self.task_flag);
        }
        cmd.arg(task.content())
            .envs(&self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        // Linux: request kernel to send SIGTERM to child when parent dies.
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        cmd
    }

    async fn run(&self, task: &Task) -> Result<Plan, GenerationError> {
        debug!(
            "Spawning plan generator: {} {:?} {}",
            self.command, self.args, self.task_flag
        );

        let child = self
            .build_command(task)
            .spawn()
            .map_err(|source| GeneratorProcessError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        let output = child
            .wait_with_output()
            .await
            .map_err(GeneratorProcessError::Io)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            debug!("generator stderr: {}", line);
        }

        let lines: Vec<&str> = stdout.lines().collect();

        if !output.status.success() {
            if let Some(message) = find_reported_error(&lines) {
                warn!("Plan generator reported an error ({})", output.status);
                return Err(GenerationError::Reported(message));
            }
            let detail = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("no diagnostic output")
                .trim()
                .to_string();
            return Err(GeneratorProcessError::AbnormalExit {
                status: output.status.to_string(),
                detail,
            }
            .into());
        }

        let plan = decode_generator_output(&lines)?;
        info!("Plan generator returned {} command(s)", plan.commands.len());
        Ok(plan)
    }
}

#[async_trait]
impl PlanGeneratorPort for ProcessPlanGenerator {
    async fn generate(&self, task: &Task) -> Result<Plan, GenerationError> {
        self.run(task).await
    }
}
