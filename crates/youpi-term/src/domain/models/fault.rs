use thiserror::Error;

use super::Joint;

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("read interrupted by external signal")]
    Interrupted,
    #[error("terminal disconnected")]
    Disconnected,
    #[error("unsupported line speed: {0} bauds")]
    UnsupportedSpeed(u32),
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArmError {
    #[error("mechanical limit reached on {joint} (target {target:.1}, range {min:.1}..{max:.1})")]
    MechanicalLimit {
        joint: Joint,
        target: f32,
        min: f32,
        max: f32,
    },
    #[error("arm communication failed: {0}")]
    Communication(String),
}

/// Faults surfacing from the dispatch loop and the actions it runs.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error(transparent)]
    Terminal(#[from] TerminalError),
    #[error(transparent)]
    Arm(#[from] ArmError),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("setup error: {0}")]
    Setup(String),
}

impl ConsoleError {
    /// True when the fault comes from a pending read cut short by an external
    /// termination request.
    pub fn is_interruption(&self) -> bool {
        return matches!(self, ConsoleError::Terminal(TerminalError::Interrupted));
    }
}

impl ArmError {
    pub fn is_mechanical_limit(&self) -> bool {
        return matches!(self, ArmError::MechanicalLimit { .. });
    }
}
