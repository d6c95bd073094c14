//! Terminal credential prompt.
//!
//! Reads a password without echo using crossterm raw mode. Esc, Ctrl+C,
//! Ctrl+D and an empty line all mean "not provided".

use crate::progress::reporter::ActivityIndicator;
use async_trait::async_trait;
use colored::Colorize;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, Write};
use taskpilot_application::{CredentialPromptError, CredentialPromptPort};
use taskpilot_domain::Credential;

/// Outcome of feeding one key to [`SecretInput`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputStep {
    Continue,
    Submit,
    Abort,
}

/// Line buffer for a hidden input
#[derive(Debug, Default)]
pub struct SecretInput {
    buffer: String,
}

impl SecretInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputStep {
        if key.kind != KeyEventKind::Press {
            return InputStep::Continue;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('d'), KeyModifiers::CONTROL)
            | (KeyCode::Esc, _) => InputStep::Abort,
            (KeyCode::Enter, _) => InputStep::Submit,
            (KeyCode::Backspace, _) => {
                self.buffer.pop();
                InputStep::Continue
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.buffer.clear();
                InputStep::Continue
            }
            (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
                self.buffer.push(c);
                InputStep::Continue
            }
            _ => InputStep::Continue,
        }
    }

    /// The entered secret; empty input yields `None`
    pub fn into_credential(self) -> Option<Credential> {
        Credential::new(self.buffer)
    }
}

/// Ask a yes/no question; only `y` answers yes.
///
/// Reads a single key in raw mode so Ctrl+C answers "no" instead of
/// being swallowed by a signal handler.
pub fn confirm(question: &str) -> io::Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{} {} ", question.bold(), "[y/N]".dimmed())?;
    stdout.flush()?;

    let answer = {
        let _raw = RawModeGuard::enable()?;
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                break is_yes(key);
            }
        }
    };
    writeln!(stdout, "{}", if answer { "y" } else { "n" })?;
    Ok(answer)
}

fn is_yes(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'))
        && !key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Restores cooked mode when dropped
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Credential prompt reading from the controlling terminal.
pub struct TerminalCredentialPrompt {
    indicator: ActivityIndicator,
}

impl TerminalCredentialPrompt {
    pub fn new() -> Self {
        Self {
            indicator: ActivityIndicator::hidden(),
        }
    }

    /// Clear this spinner before prompting
    pub fn with_indicator(mut self, indicator: ActivityIndicator) -> Self {
        self.indicator = indicator;
        self
    }

    fn read_secret(label: &str) -> io::Result<Option<Credential>> {
        let mut stdout = io::stdout();
        write!(stdout, "{} ", format!("{}:", label).yellow().bold())?;
        stdout.flush()?;

        let mut input = SecretInput::new();
        let step = {
            let _raw = RawModeGuard::enable()?;
            loop {
                if let Event::Key(key) = event::read()? {
                    match input.handle_key(key) {
                        InputStep::Continue => continue,
                        step => break step,
                    }
                }
            }
        };
        writeln!(stdout)?;

        Ok(match step {
            InputStep::Submit => input.into_credential(),
            _ => None,
        })
    }
}

impl Default for TerminalCredentialPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialPromptPort for TerminalCredentialPrompt {
    async fn prompt_secret(&self, label: &str) -> Result<Option<Credential>, CredentialPromptError> {
        self.indicator.clear();
        let label = label.to_string();
        tokio::task::spawn_blocking(move || Self::read_secret(&label))
            .await
            .map_err(|e| CredentialPromptError::Io(e.to_string()))?
            .map_err(|e| CredentialPromptError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(input: &mut SecretInput, text: &str) {
        for c in text.chars() {
            assert_eq!(input.handle_key(key(KeyCode::Char(c))), InputStep::Continue);
        }
    }

    #[test]
    fn test_submit_collects_secret() {
        let mut input = SecretInput::new();
        type_str(&mut input, "hunter2");
        assert_eq!(input.handle_key(key(KeyCode::Enter)), InputStep::Submit);
        assert_eq!(
            input.into_credential().map(|c| c.expose().to_string()),
            Some("hunter2".to_string())
        );
    }

    #[test]
    fn test_backspace_and_clear_line() {
        let mut input = SecretInput::new();
        type_str(&mut input, "abc");
        input.handle_key(key(KeyCode::Backspace));
        type_str(&mut input, "d");
        assert_eq!(input.buffer, "abd");

        input.handle_key(ctrl('u'));
        assert!(input.into_credential().is_none());
    }

    #[test]
    fn test_empty_submit_is_not_provided() {
        let mut input = SecretInput::new();
        assert_eq!(input.handle_key(key(KeyCode::Enter)), InputStep::Submit);
        assert!(input.into_credential().is_none());
    }

    #[test]
    fn test_abort_keys() {
        for abort in [key(KeyCode::Esc), ctrl('c'), ctrl('d')] {
            let mut input = SecretInput::new();
            type_str(&mut input, "x");
            assert_eq!(input.handle_key(abort), InputStep::Abort);
        }
    }

    #[test]
    fn test_only_y_confirms() {
        assert!(is_yes(key(KeyCode::Char('y'))));
        assert!(is_yes(key(KeyCode::Char('Y'))));
        assert!(!is_yes(key(KeyCode::Char('n'))));
        assert!(!is_yes(key(KeyCode::Enter)));
        assert!(!is_yes(ctrl('y')));
    }

    #[test]
    fn test_other_control_keys_are_ignored() {
        let mut input = SecretInput::new();
        assert_eq!(input.handle_key(ctrl('a')), InputStep::Continue);
        assert_eq!(input.handle_key(key(KeyCode::Tab)), InputStep::Continue);
        assert!(input.buffer.is_empty());
    }
}
