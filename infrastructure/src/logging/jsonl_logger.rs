//! JSONL session transcript.
//!
//! One file per session. The first line is a `transcriptStarted` header;
//! every following line is a [`SessionEvent`] in its serialized form,
//! prefixed with a sequence number and a UTC timestamp:
//!
//! ```text
//! {"seq":0,"timestamp":"2026-10-18T09:12:01.004Z","type":"transcriptStarted","pid":4242,"version":"0.3.0"}
//! {"seq":1,"timestamp":"2026-10-18T09:12:01.010Z","type":"generationStarted","task":"list files"}
//! {"seq":2,"timestamp":"2026-10-18T09:12:03.377Z","type":"planReady","commands":["ls"],"files":[]}
//! ```
//!
//! Lines are buffered and flushed whenever an operation ends (a terminal
//! event) and on drop, so a finished generation or execution is always on
//! disk even if the process is killed afterwards.

use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use taskpilot_application::{SessionEvent, SessionLogger};
use tracing::warn;

/// First record of every transcript
#[derive(Serialize)]
#[serde(tag = "type", rename = "transcriptStarted")]
struct TranscriptHeader {
    pid: u32,
    version: &'static str,
}

/// One transcript line: envelope fields plus the flattened body
#[derive(Serialize)]
struct Record<'a, T: Serialize> {
    seq: u64,
    timestamp: String,
    #[serde(flatten)]
    body: &'a T,
}

struct TranscriptWriter {
    out: BufWriter<File>,
    next_seq: u64,
    write_failed: bool,
}

impl TranscriptWriter {
    fn append<T: Serialize>(&mut self, body: &T) -> io::Result<()> {
        let record = Record {
            seq: self.next_seq,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            body,
        };
        serde_json::to_writer(&mut self.out, &record)?;
        self.out.write_all(b"\n")?;
        self.next_seq += 1;
        Ok(())
    }
}

/// Session logger writing a JSONL transcript file.
pub struct JsonlSessionLogger {
    writer: Mutex<TranscriptWriter>,
    path: PathBuf,
}

impl JsonlSessionLogger {
    /// Create the transcript at `path` (parent directories included) and
    /// write its header.
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = TranscriptWriter {
            out: BufWriter::new(File::create(path)?),
            next_seq: 0,
            write_failed: false,
        };
        writer.append(&TranscriptHeader {
            pid: std::process::id(),
            version: env!("CARGO_PKG_VERSION"),
        })?;
        writer.out.flush()?;

        Ok(Self {
            writer: Mutex::new(writer),
            path: path.to_path_buf(),
        })
    }

    /// Create a transcript for a new session inside `dir`.
    ///
    /// The file is named `session-<UTC timestamp>.jsonl`.
    pub fn in_dir(dir: impl AsRef<Path>) -> io::Result<Self> {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        Self::new(dir.as_ref().join(format!("session-{}.jsonl", stamp)))
    }

    /// Get the path to the transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionLogger for JsonlSessionLogger {
    fn log(&self, event: &SessionEvent) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };

        let mut result = writer.append(event);
        if result.is_ok() && event.is_terminal() {
            result = writer.out.flush();
        }

        // Report the first failure only; a full disk would otherwise warn per event
        if let Err(e) = result
            && !writer.write_failed
        {
            writer.write_failed = true;
            warn!("Session transcript {} is incomplete: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlSessionLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.out.flush();
        }
    }
}
