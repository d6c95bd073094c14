//! Session Presenter - Renders SessionEvents to the terminal
//!
//! All println!/colored output of the front-ends is concentrated here. The
//! presenter also remembers the last plan it saw so `/plan` can show it
//! again without asking the controller.

use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ActivityIndicator;
use taskpilot_application::{SessionEvent, SessionHandle};
use tokio::sync::mpsc;
use tracing::debug;

/// A plan as announced by `planReady`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanView {
    pub commands: Vec<String>,
    pub files: Vec<String>,
}

/// Renders session events and tracks the plan on offer
pub struct SessionPresenter {
    indicator: ActivityIndicator,
    last_plan: Option<PlanView>,
}

impl SessionPresenter {
    pub fn new(indicator: ActivityIndicator) -> Self {
        Self {
            indicator,
            last_plan: None,
        }
    }

    /// The plan waiting for approval, if any
    pub fn last_plan(&self) -> Option<&PlanView> {
        self.last_plan.as_ref()
    }

    /// Render a single SessionEvent to the terminal
    pub fn render(&mut self, event: &SessionEvent) {
        self.track(event);

        if let Some(text) = ConsoleFormatter::format_event(event) {
            self.indicator.clear();
            println!("{}", text);
        }

        match event {
            SessionEvent::GenerationStarted { .. } => self.indicator.start("Generating plan..."),
            SessionEvent::CommandStarting { command, .. } => {
                self.indicator.start(format!("Running {}", command))
            }
            _ => {}
        }
    }

    fn track(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::PlanReady { commands, files } => {
                self.last_plan = Some(PlanView {
                    commands: commands.clone(),
                    files: files.clone(),
                });
            }
            SessionEvent::GenerationStarted { .. } | SessionEvent::CommandStarting { .. } => {
                self.last_plan = None;
            }
            // Every other terminal event leaves the session idle
            event if event.is_terminal() => self.last_plan = None,
            _ => {}
        }
    }

    /// Render events until one ends the current operation.
    ///
    /// Ctrl+C while waiting asks the controller to cancel. Returns `None`
    /// if the controller went away first.
    pub async fn await_outcome(
        &mut self,
        events: &mut mpsc::UnboundedReceiver<SessionEvent>,
        handle: &SessionHandle,
    ) -> Option<SessionEvent> {
        loop {
            tokio::select! {
                event = events.recv() => {
                    let event = event?;
                    self.render(&event);
                    if event.is_terminal() {
                        return Some(event);
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    debug!("Ctrl+C received; requesting cancel");
                    self.indicator.clear();
                    println!("^C");
                    handle.cancel();
                }
            }
        }
    }
}
