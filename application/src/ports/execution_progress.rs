//! Execution progress port.
//!
//! [`ExecutionProgressNotifier`] is an **output port** that receives
//! per-command progress from
//! [`ExecutePlanUseCase`](crate::use_cases::execute_plan::ExecutePlanUseCase).
//! For each command, `on_command_start` is always called before
//! `on_command_result`, and commands are reported in plan order.

use taskpilot_domain::ExecutionResult;

/// Progress notifier for plan execution.
///
/// All methods have default no-op implementations, so implementers only
/// need to override the callbacks they care about.
pub trait ExecutionProgressNotifier: Send + Sync {
    /// Called right before command `index` (0-based) of `total` starts
    fn on_command_start(&self, _index: usize, _total: usize, _command: &str) {}

    /// Called when command `index` produced its result
    fn on_command_result(&self, _index: usize, _total: usize, _result: &ExecutionResult) {}
}

/// No-op progress notifier
pub struct NoExecutionProgress;

impl ExecutionProgressNotifier for NoExecutionProgress {}
