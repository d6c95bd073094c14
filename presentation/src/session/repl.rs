//! REPL (Read-Eval-Print Loop) for interactive sessions
//!
//! Plain text asks for a plan; slash commands approve, cancel or inspect
//! it. Every request waits for the controller to finish the operation
//! before the prompt returns, so Ctrl+C while waiting cancels it.

use crate::output::console::ConsoleFormatter;
use crate::session::presenter::SessionPresenter;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use taskpilot_application::{SessionEvent, SessionHandle};
use tokio::sync::mpsc;
use tracing::warn;

const HISTORY_CAPACITY: usize = 1000;

/// A parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Generate(String),
    Approve,
    Cancel,
    ShowPlan,
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a trimmed, non-empty line
    pub fn parse(line: &str) -> Self {
        if !line.starts_with('/') {
            return ReplCommand::Generate(line.to_string());
        }
        match line {
            "/approve" | "/a" | "/run" => ReplCommand::Approve,
            "/cancel" | "/c" => ReplCommand::Cancel,
            "/plan" | "/p" => ReplCommand::ShowPlan,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

/// Interactive session REPL
pub struct SessionRepl {
    handle: SessionHandle,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    presenter: SessionPresenter,
    history_path: Option<PathBuf>,
}

impl SessionRepl {
    pub fn new(
        handle: SessionHandle,
        events: mpsc::UnboundedReceiver<SessionEvent>,
        presenter: SessionPresenter,
    ) -> Self {
        Self {
            handle,
            events,
            presenter,
            history_path: None,
        }
    }

    /// Persist input history to this file
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    fn build_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_path else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("History disabled ({}): {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL until `/quit` or Ctrl+D.
    ///
    /// Requires a multi-threaded runtime: line editing blocks the current
    /// worker while the controller keeps running on the others.
    pub async fn run(mut self) -> std::io::Result<()> {
        let mut editor = self.build_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("taskpilot".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            let signal = tokio::task::block_in_place(|| editor.read_line(&prompt));

            match signal {
                Ok(Signal::Success(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if !self.dispatch(ReplCommand::parse(line)).await {
                        break;
                    }
                }
                Ok(Signal::CtrlC) => continue,
                Ok(_) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    self.handle.shutdown();
                    return Err(err);
                }
            }
        }

        self.handle.shutdown();
        Ok(())
    }

    /// Handle one command. Returns false when the REPL should exit.
    async fn dispatch(&mut self, command: ReplCommand) -> bool {
        let sent = match command {
            ReplCommand::Generate(task) => self.handle.generate(task),
            ReplCommand::Approve => self.handle.approve(),
            ReplCommand::Cancel => self.handle.cancel(),
            ReplCommand::ShowPlan => {
                self.print_plan();
                return true;
            }
            ReplCommand::Help => {
                Self::print_help();
                return true;
            }
            ReplCommand::Quit => {
                println!("Bye!");
                return false;
            }
            ReplCommand::Unknown(cmd) => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type /help for available commands");
                return true;
            }
        };

        if !sent {
            println!("{}", "Session controller stopped".red());
            return false;
        }

        println!();
        let finished = self
            .presenter
            .await_outcome(&mut self.events, &self.handle)
            .await;
        println!();
        finished.is_some()
    }

    fn print_plan(&self) {
        match self.presenter.last_plan() {
            Some(plan) => println!(
                "{}",
                ConsoleFormatter::format_plan(&plan.commands, &plan.files)
            ),
            None => println!("{}", "No plan. Type a task to generate one.".dimmed()),
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            taskpilot - interactive          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Describe a task to get a plan, then /approve to run it.");
        Self::print_help();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  <task>               - Generate a plan for <task>");
        println!("  /approve, /a, /run   - Run the current plan");
        println!("  /cancel, /c          - Discard the current plan");
        println!("  /plan, /p            - Show the current plan");
        println!("  /help, /h, /?        - Show this help");
        println!("  /quit, /exit, /q     - Exit");
        println!();
        println!("Press Ctrl+C while a plan is generating or running to cancel it.");
        println!();
    }
}
