//! Console formatting for session events

use colored::Colorize;
use taskpilot_application::SessionEvent;
use taskpilot_domain::ExecutionResult;

/// Formats session events for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a generated plan: numbered commands followed by file blocks
    pub fn format_plan(commands: &[String], files: &[String]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Plan"));
        output.push('\n');

        if commands.is_empty() {
            output.push_str(&format!("{}\n", "(no commands)".dimmed()));
        } else {
            output.push_str(&format!("{}\n", "Commands:".cyan().bold()));
            for (i, command) in commands.iter().enumerate() {
                output.push_str(&format!("  {:>2}. {}\n", i + 1, command));
            }
        }

        if !files.is_empty() {
            output.push_str(&format!("\n{}\n", "Files:".cyan().bold()));
            for file in files {
                output.push_str(&Self::indent(file, "  "));
                output.push('\n');
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Line announcing a command about to run
    pub fn format_command_start(index: usize, total: usize, command: &str) -> String {
        format!(
            "{} {}",
            format!("[{}/{}]", index + 1, total).dimmed(),
            format!("Executing: {}", command).bold()
        )
    }

    /// Result block of a single command
    pub fn format_result(result: &ExecutionResult) -> String {
        let body = Self::indent(result.output.trim_end(), "    ");
        if result.success {
            format!("  {} done\n{}", "v".green(), body)
        } else {
            format!("  {} failed\n{}", "x".red(), body.red())
        }
    }

    /// Render one session event, or `None` for events with no console output
    pub fn format_event(event: &SessionEvent) -> Option<String> {
        match event {
            SessionEvent::GenerationStarted { task } => Some(format!(
                "{} {}",
                "Planning:".cyan().bold(),
                task
            )),
            SessionEvent::PlanReady { commands, files } => {
                Some(Self::format_plan(commands, files))
            }
            SessionEvent::GenerationCancelled => {
                Some("Plan generation cancelled".yellow().to_string())
            }
            SessionEvent::CommandStarting {
                index,
                total,
                command,
            } => Some(Self::format_command_start(*index, *total, command)),
            SessionEvent::ExecutionResult { result, .. } => Some(Self::format_result(result)),
            SessionEvent::ExecutionCompleted { executed } => Some(
                format!("Plan executed successfully ({} command(s))", executed)
                    .green()
                    .bold()
                    .to_string(),
            ),
            SessionEvent::ExecutionCancelled { executed } => Some(
                format!("Execution cancelled after {} command(s)", executed)
                    .yellow()
                    .to_string(),
            ),
            SessionEvent::Cancelled => Some("Cancelled".yellow().to_string()),
            SessionEvent::Error { message } => {
                Some(format!("{} {}", "Error:".red().bold(), message))
            }
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_plan_numbers_commands() {
        plain();
        let output = ConsoleFormatter::format_plan(
            &["mkdir out".to_string(), "ls out".to_string()],
            &["out/a.txt:\nhello\nworld".to_string()],
        );
        assert!(output.contains(" 1. mkdir out"));
        assert!(output.contains(" 2. ls out"));
        assert!(output.contains("  out/a.txt:\n  hello\n  world"));
    }

    #[test]
    fn test_format_empty_plan() {
        plain();
        let output = ConsoleFormatter::format_plan(&[], &[]);
        assert!(output.contains("(no commands)"));
        assert!(!output.contains("Files:"));
    }

    #[test]
    fn test_format_command_start() {
        plain();
        assert_eq!(
            ConsoleFormatter::format_command_start(0, 3, "echo hi"),
            "[1/3] Executing: echo hi"
        );
    }

    #[test]
    fn test_format_result() {
        plain();
        let ok = ConsoleFormatter::format_result(&ExecutionResult::success("hi\n"));
        assert_eq!(ok, "  v done\n    hi");

        let failed = ConsoleFormatter::format_result(&ExecutionResult::failure("boom\n"));
        assert_eq!(failed, "  x failed\n    boom");
    }

    #[test]
    fn test_format_error_event() {
        plain();
        let rendered = ConsoleFormatter::format_event(&SessionEvent::error("no plan to execute"));
        assert_eq!(rendered.as_deref(), Some("Error: no plan to execute"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
