//! Core domain logic for the operator console.
//!
//! This module contains the menu dispatch and manual control logic, written
//! against the terminal and arm service traits rather than concrete devices.

pub mod models;
pub mod services;
