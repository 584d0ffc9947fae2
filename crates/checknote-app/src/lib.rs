//! checknote-app library root.
//!
//! Re-exports internal modules so that integration tests can exercise
//! them directly without a terminal.

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod logging;
pub mod tui;
