//! CLI-specific utilities for route-planner
//!
//! This module contains code specific to the command-line interface,
//! separate from the core library functionality.

pub mod commands;
pub mod notify;
pub mod progress;

pub use commands::{parse_command, Command};
pub use notify::{notify, Severity};
pub use progress::Spinner;
