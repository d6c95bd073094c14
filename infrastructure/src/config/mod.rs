//! Configuration file loading for taskpilot
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./taskpilot.toml` or `./.taskpilot.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/taskpilot/config.toml`
//! 4. Fallback: `~/.config/taskpilot/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileExecutorConfig, FileGeneratorConfig,
    FileLoggingConfig, FileOutputConfig, FileReplConfig,
};
pub use loader::ConfigLoader;
