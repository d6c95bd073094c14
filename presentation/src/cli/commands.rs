//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for taskpilot
#[derive(Parser, Debug)]
#[command(name = "taskpilot")]
#[command(author, version, about = "Turn a task into a shell plan, review it, then run it")]
#[command(long_about = r#"
taskpilot asks a plan generator for the shell commands (and files) that
accomplish a task, shows you the plan, and runs the commands one by one
after you approve it. Commands starting with `sudo` prompt for a password.

Without a task, an interactive session starts:
  <text>     Generate a plan for <text>
  /approve   Run the current plan
  /cancel    Stop the running operation or discard the plan
  /plan      Show the current plan
  /quit      Exit

Configuration files are loaded from (in priority order):
1. --config <path>                          Explicit config file
2. ./taskpilot.toml or ./.taskpilot.toml    Project-level config
3. ~/.config/taskpilot/config.toml          Global config

Example:
  taskpilot "create a python virtualenv in ./venv"
  taskpilot --yes "list the ten largest files in /var/log"
  taskpilot
"#)]
pub struct Cli {
    /// The task to plan and run (omit for an interactive session)
    pub task: Option<String>,

    /// Run the generated plan without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
