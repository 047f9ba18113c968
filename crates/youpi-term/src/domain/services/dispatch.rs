use std::time::Duration;

use super::ActionRegistry;
use super::Menu;
use crate::domain::models::ConsoleError;
use crate::domain::models::Session;

const TITLE: &str = "Menu principal";
const READY_STATUS: &str = "Choisissez une action";
const DEFAULT_FAULT_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The session was asked to stop from outside.
    Terminated,
    /// The operator left the menu.
    Cancelled,
}

/// Main menu loop: show the registered actions, read a selection, run the
/// matching action, repeat.
///
/// Actions run to completion before the loop looks at the termination flag
/// again, so a motion in progress is never cut short. Faults other than an
/// interruption are logged and shown on the status line, and the menu comes
/// back.
pub struct DispatchLoop {
    registry: ActionRegistry,
    fault_backoff: Duration,
}

impl DispatchLoop {
    pub fn new(registry: ActionRegistry) -> DispatchLoop {
        return DispatchLoop {
            registry,
            fault_backoff: DEFAULT_FAULT_BACKOFF,
        };
    }

    /// Pause after an unexpected fault, so that a dead link does not spin
    /// the loop.
    pub fn with_fault_backoff(mut self, backoff: Duration) -> DispatchLoop {
        self.fault_backoff = backoff;
        return self;
    }

    pub async fn run(&self, session: &mut Session) -> Result<LoopExit, ConsoleError> {
        if self.registry.is_empty() {
            return Err(ConsoleError::Configuration(
                "no action registered for the main menu".to_string(),
            ));
        }

        let mut status = READY_STATUS.to_string();
        loop {
            if session.state.is_terminated() {
                tracing::info!("termination requested, leaving main menu");
                return Ok(LoopExit::Terminated);
            }

            match self.step(session, &status).await {
                Ok(Some(exit)) => return Ok(exit),
                Ok(None) => status = READY_STATUS.to_string(),
                Err(err) if err.is_interruption() => {
                    tracing::info!("read interrupted by external signal");
                    session.state.terminate();
                    return Ok(LoopExit::Terminated);
                }
                Err(err) => {
                    tracing::error!(error = ?err, "unexpected error");
                    status = format!("Erreur : {err}");
                    self.back_off(session).await;
                }
            }
        }
    }

    async fn step(
        &self,
        session: &mut Session,
        status: &str,
    ) -> Result<Option<LoopExit>, ConsoleError> {
        tracing::info!("displaying main menu");
        let menu = Menu::new(TITLE, self.registry.labels())
            .cancelable(session.state.exit_allowed());
        menu.display(session.terminal.as_mut()).await?;
        session.terminal.display_status(status).await?;

        let choice = menu.get_choice(session.terminal.as_mut()).await?;
        if session.state.is_terminated() {
            return Ok(Some(LoopExit::Terminated));
        }

        let Some(selection) = choice else {
            if session.state.exit_allowed() {
                tracing::info!("main menu cancelled by operator");
                return Ok(Some(LoopExit::Cancelled));
            }
            return Ok(None);
        };

        let Some(action) = self.registry.get(selection) else {
            tracing::warn!(selection, "no action at selection");
            return Ok(None);
        };

        tracing::info!(label = %action.label, "selected action");
        session.terminal.display_status(&action.label).await?;
        action.handler.run(session).await?;

        if session.state.is_terminated() {
            return Ok(Some(LoopExit::Terminated));
        }

        return Ok(None);
    }

    async fn back_off(&self, session: &Session) {
        if self.fault_backoff.is_zero() {
            return;
        }

        let terminated = session.state.termination_token();
        tokio::select! {
            _ = terminated.cancelled() => {},
            _ = tokio::time::sleep(self.fault_backoff) => {},
        }
    }
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
