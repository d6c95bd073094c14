//! Shell command runner adapter

pub mod runner;

pub use runner::{DEFAULT_SHELL, ShellCommandRunner};
