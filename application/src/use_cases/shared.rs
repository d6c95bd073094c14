//! Shared utilities for use cases.

use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// A missing token never cancels.
pub(crate) fn cancellation_requested(token: &Option<CancellationToken>) -> bool {
    matches!(token, Some(token) if token.is_cancelled())
}
