//! Configuration management for the operator console.
//!
//! Values are layered: built-in defaults, then the TOML configuration file,
//! then command line flags.

mod config;

pub use config::*;
