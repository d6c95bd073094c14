//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for JSONL session transcripts (disabled when unset)
    pub transcript_dir: Option<String>,
}

impl FileLoggingConfig {
    /// Transcript directory with a leading `~/` expanded to the home directory
    pub fn resolved_transcript_dir(&self) -> Option<PathBuf> {
        let raw = self.transcript_dir.as_deref()?;
        match raw.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(raw)),
        }
    }
}
