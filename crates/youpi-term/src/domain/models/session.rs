use tokio_util::sync::CancellationToken;

use super::ArmBox;
use super::TerminalBox;

/// Flags shared between the session and the shutdown watcher.
///
/// `terminated` is one-shot: once set it stays set.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    terminated: CancellationToken,
    exit_allowed: bool,
}

impl SessionState {
    pub fn new(exit_allowed: bool) -> SessionState {
        return SessionState {
            terminated: CancellationToken::new(),
            exit_allowed,
        };
    }

    pub fn terminate(&self) {
        self.terminated.cancel();
    }

    pub fn is_terminated(&self) -> bool {
        return self.terminated.is_cancelled();
    }

    pub fn exit_allowed(&self) -> bool {
        return self.exit_allowed;
    }

    /// Resolves waits that must not outlive the session.
    pub fn termination_token(&self) -> CancellationToken {
        return self.terminated.clone();
    }
}

pub struct Session {
    pub terminal: TerminalBox,
    pub arm: ArmBox,
    pub state: SessionState,
}

impl Session {
    pub fn new(terminal: TerminalBox, arm: ArmBox, state: SessionState) -> Session {
        return Session {
            terminal,
            arm,
            state,
        };
    }
}
