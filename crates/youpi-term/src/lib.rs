//! Minitel operator console for the Youpi teaching arm.
//!
//! This crate drives a menu-based interface rendered on a Minitel plugged into a
//! serial port. The operator picks actions from a numbered menu, and the manual
//! control mode maps single keystrokes to incremental joint moves while keeping
//! the arm within its mechanical limits.

pub mod application;
pub mod configuration;
pub mod domain;
pub mod infrastructure;
pub use application::console::{start, ConsoleOptions};
pub use configuration::{Config, ConfigKey};
pub use domain::models::{
    Action, ArmError, ArmName, ArmService, ConsoleError, Joint, Key, Session, SessionState,
    TerminalError, TerminalService,
};
pub use domain::services::{ActionRegistry, DispatchLoop, LoopExit};
