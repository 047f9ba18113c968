//! Application layer wiring the console together.
//!
//! This module handles command-line parsing and the session lifecycle, from
//! opening the Minitel to the farewell screen.

pub mod cli;
pub mod console;
