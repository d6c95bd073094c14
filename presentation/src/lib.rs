//! Presentation layer for taskpilot
//!
//! This crate contains the CLI definition, console rendering of session
//! events, the terminal credential prompt and the interactive REPL.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ActivityIndicator;
pub use prompt::terminal::{TerminalCredentialPrompt, confirm};
pub use session::oneshot::{OneShotOutcome, OneShotRunner};
pub use session::presenter::{PlanView, SessionPresenter};
pub use session::repl::{ReplCommand, SessionRepl};
