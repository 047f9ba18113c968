//! Infrastructure layer providing the concrete devices.
//!
//! This module contains the serial Minitel terminal and the arm backends
//! the console can be started with.

pub mod arms;
pub mod terminals;
