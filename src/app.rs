//! Module containing concrete implementations from the [core](crate::core) module.

/// Repository implementations.
pub mod repo;

/// Line-oriented interaction shell.
pub mod shell;

/// Application state configuration.
pub mod state;
