//! CLI entrypoint for taskpilot
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use taskpilot_application::{ExecutePlanUseCase, GeneratePlanUseCase, SessionController};
use taskpilot_infrastructure::{
    ConfigLoader, FileConfig, JsonlSessionLogger, ProcessPlanGenerator, ShellCommandRunner,
};
use taskpilot_presentation::{
    ActivityIndicator, Cli, OneShotRunner, OutputConfig, ReplConfig, SessionPresenter,
    SessionRepl, TerminalCredentialPrompt,
};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting taskpilot");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    check_config(&config)?;

    let output = OutputConfig {
        color: config.output.color,
        show_progress: config.output.show_progress && !cli.quiet,
    };
    output.apply();

    // === Dependency Injection ===
    let indicator = ActivityIndicator::new(output.show_progress);

    let mut generator = ProcessPlanGenerator::new(config.generator.command.clone())
        .with_args(config.generator.args.clone())
        .with_task_flag(config.generator.task_flag.clone())
        .with_envs(config.generator.env.clone());
    if let Some(dir) = &config.generator.working_dir {
        generator = generator.with_working_dir(dir);
    }

    let mut runner = ShellCommandRunner::new(config.executor.shell.clone());
    if let Some(dir) = &config.executor.working_dir {
        runner = runner.with_working_dir(dir);
    }

    let prompt = TerminalCredentialPrompt::new().with_indicator(indicator.clone());

    let generate_plan = GeneratePlanUseCase::new(Arc::new(generator));
    let execute_plan = ExecutePlanUseCase::new(Arc::new(runner))
        .with_credential_prompt(Arc::new(prompt))
        .with_params(config.executor.to_execution_params());

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut controller = SessionController::new(generate_plan, execute_plan, event_tx);

    if let Some(dir) = config.logging.resolved_transcript_dir() {
        match JsonlSessionLogger::in_dir(&dir) {
            Ok(logger) => {
                info!("Session transcript: {}", logger.path().display());
                controller = controller.with_session_logger(Arc::new(logger));
            }
            Err(e) => warn!("Session transcript disabled ({}): {}", dir.display(), e),
        }
    }

    let (handle, controller_task) = controller.spawn();
    let presenter = SessionPresenter::new(indicator);

    // One-shot mode
    if let Some(task) = cli.task {
        let outcome = OneShotRunner::new(handle, event_rx, presenter)
            .with_auto_approve(cli.yes)
            .run(&task)
            .await;
        controller_task.await.context("Session controller failed")?;

        return Ok(if outcome.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    // Interactive mode
    let repl_config = ReplConfig {
        history_file: config.repl.history_file.clone(),
    };
    SessionRepl::new(handle, event_rx, presenter)
        .with_history_file(repl_config.history_path())
        .run()
        .await?;
    controller_task.await.context("Session controller failed")?;

    Ok(ExitCode::SUCCESS)
}

/// Initialize tracing based on verbosity, optionally writing to a file
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
        return Ok(None);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

/// Report configuration issues; fatal ones abort startup
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in issues.iter().filter(|issue| !issue.is_fatal()) {
        warn!("Config: {}", issue);
    }

    let fatal: Vec<String> = issues
        .iter()
        .filter(|issue| issue.is_fatal())
        .map(ToString::to_string)
        .collect();
    if !fatal.is_empty() {
        bail!("Invalid configuration: {}", fatal.join("; "));
    }
    Ok(())
}
