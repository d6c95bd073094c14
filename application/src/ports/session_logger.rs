//! Port for structured session transcripts.
//!
//! Defines the [`SessionLogger`] trait for recording every outbound session
//! event to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the session
//! transcript in a machine-readable format (JSONL).

use crate::ports::session_event::SessionEvent;

/// Port for logging session events.
///
/// `log` is called with every event before it is delivered to the
/// front-end. It is synchronous and non-fallible; logging failures never
/// interrupt a session.
pub trait SessionLogger: Send + Sync {
    /// Record a session event.
    fn log(&self, event: &SessionEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoSessionLogger;

impl SessionLogger for NoSessionLogger {
    fn log(&self, _event: &SessionEvent) {}
}
