//! Spinner shown while waiting on the generator or a running command

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A single shared spinner slot.
///
/// Cloning shares the slot, so the credential prompt can clear the spinner
/// the presenter started before it takes over the terminal.
#[derive(Clone)]
pub struct ActivityIndicator {
    enabled: bool,
    bar: Arc<Mutex<Option<ProgressBar>>>,
}

impl ActivityIndicator {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            bar: Arc::new(Mutex::new(None)),
        }
    }

    /// Indicator that never draws anything
    pub fn hidden() -> Self {
        Self::new(false)
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Replace any active spinner with a new one showing `message`
    pub fn start(&self, message: impl Into<String>) {
        if !self.enabled {
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message.into());
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.bar.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    /// Remove the active spinner, if any
    pub fn clear(&self) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }

    pub fn is_active(&self) -> bool {
        self.bar.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }
}

impl Default for ActivityIndicator {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_indicator_never_starts() {
        let indicator = ActivityIndicator::hidden();
        indicator.start("Planning");
        assert!(!indicator.is_active());
    }

    #[test]
    fn test_clear_through_shared_clone() {
        let indicator = ActivityIndicator::new(true);
        let shared = indicator.clone();

        indicator.start("Running");
        assert!(shared.is_active());

        shared.clear();
        assert!(!indicator.is_active());
    }
}
